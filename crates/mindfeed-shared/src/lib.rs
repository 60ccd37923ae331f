//! # MindFeed Shared
//!
//! Wire types exchanged between the feed API and its clients.
//! Kept free of domain dependencies so clients can compile it alone.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
