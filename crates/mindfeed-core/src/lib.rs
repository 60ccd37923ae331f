//! # MindFeed Core
//!
//! The domain layer of the feed: post types, the acceptance rules a post has to
//! pass before it is stored, and the filter model used to read posts back.
//! Storage, moderation and network access are reached only through the traits
//! in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
pub use services::FeedService;
pub use validation::{PostValidator, ValidationPolicy, Violation};
