//! Domain entities - the core business objects.

mod filter;
mod geo;
mod kind;
mod post;

pub use filter::{DateRange, FeedFilter, GeoRadius, feed_order, sort_feed};
pub use geo::GeoPoint;
pub use kind::{KindRules, PostKind, RouteDifficulty, UnknownDifficulty, UnknownPostKind};
pub use post::{Post, PostDraft};
