//! # MindFeed Infrastructure
//!
//! Concrete implementations of the ports defined in `mindfeed-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL post repository via SeaORM
//! - `http-probe` - Source reachability checks over HTTP via reqwest

pub mod database;
pub mod probe;

pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use probe::{ProbeConfig, UnreachableProbe};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;

#[cfg(feature = "http-probe")]
pub use probe::HttpReachabilityProbe;
