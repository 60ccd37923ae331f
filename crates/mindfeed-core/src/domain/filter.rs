//! Feed query model.
//!
//! A [`FeedFilter`] is a set of optional predicates combined with AND. An absent
//! field matches every post. Repository adapters may translate the filter into
//! their own query language, but [`FeedFilter::matches`] is the reference
//! semantics they must agree with.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GeoPoint, Post, PostKind};

/// Creation-time window, both bounds inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at <= to)
    }
}

/// Circle around a center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRadius {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl GeoRadius {
    pub fn new(center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.center.distance_meters(point) <= self.radius_meters
    }
}

/// Optional predicates for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedFilter {
    pub kind: Option<PostKind>,
    /// Exact set membership, never a prefix or substring match.
    pub tag: Option<String>,
    pub emotion: Option<String>,
    pub cause: Option<String>,
    pub created: Option<DateRange>,
    /// Posts without coordinates never match a geo filter.
    pub near: Option<GeoRadius>,
    pub linked_route_id: Option<Uuid>,
    /// Applied after ordering.
    pub limit: Option<u64>,
}

impl FeedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_kind(kind: PostKind) -> Self {
        Self::new().with_kind(kind)
    }

    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self::new().with_tag(tag)
    }

    pub fn by_emotion(emotion: impl Into<String>) -> Self {
        Self::new().with_emotion(emotion)
    }

    pub fn by_cause(cause: impl Into<String>) -> Self {
        Self::new().with_cause(cause)
    }

    pub fn by_route(route_id: Uuid) -> Self {
        Self {
            linked_route_id: Some(route_id),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: PostKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn created_within(mut self, range: DateRange) -> Self {
        self.created = Some(range);
        self
    }

    pub fn near(mut self, center: GeoPoint, radius_meters: f64) -> Self {
        self.near = Some(GeoRadius::new(center, radius_meters));
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when no predicate is set (the limit is not a predicate).
    pub fn is_open(&self) -> bool {
        self.kind.is_none()
            && self.tag.is_none()
            && self.emotion.is_none()
            && self.cause.is_none()
            && self.created.is_none()
            && self.near.is_none()
            && self.linked_route_id.is_none()
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.kind.is_none_or(|kind| post.kind == kind)
            && self.tag.as_deref().is_none_or(|tag| post.has_tag(tag))
            && self
                .emotion
                .as_deref()
                .is_none_or(|emotion| post.emotion.as_deref() == Some(emotion))
            && self
                .cause
                .as_deref()
                .is_none_or(|cause| post.cause.as_deref() == Some(cause))
            && self
                .created
                .is_none_or(|range| range.contains(post.created_at))
            && self.near.is_none_or(|area| {
                post.coordinates
                    .as_ref()
                    .is_some_and(|point| area.contains(point))
            })
            && self
                .linked_route_id
                .is_none_or(|route| post.linked_route_id == Some(route))
    }

    /// Filter, order and truncate an arbitrary set of posts.
    pub fn apply<I>(&self, posts: I) -> Vec<Post>
    where
        I: IntoIterator<Item = Post>,
    {
        let mut selected: Vec<Post> = posts.into_iter().filter(|p| self.matches(p)).collect();
        sort_feed(&mut selected);
        if let Some(limit) = self.limit {
            selected.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        selected
    }
}

/// Feed ordering: newest first, ties broken by id so the order is total.
pub fn feed_order(a: &Post, b: &Post) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_feed(posts: &mut [Post]) {
    posts.sort_by(feed_order);
}
