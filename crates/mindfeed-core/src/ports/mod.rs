//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod moderation;
mod reachability;
mod repository;

pub use moderation::HumanDetector;
pub use reachability::ReachabilityProbe;
pub use repository::{BaseRepository, PostRepository};
