//! Application services orchestrating domain rules and ports.

mod feed;

pub use feed::FeedService;
