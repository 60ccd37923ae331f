use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GeoPoint, PostKind, RouteDifficulty};

/// The caller-supplied part of a post, as received on create and update.
///
/// Identity and timestamps are absent on purpose: the id is assigned by
/// [`crate::FeedService`] and timestamps are stamped by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub kind: PostKind,
    pub title: String,
    pub content: String,
    pub media_reference: Option<String>,
    pub source_reference: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub tags: BTreeSet<String>,
    pub author: Option<String>,
    pub emotion: Option<String>,
    pub cause: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub difficulty: Option<RouteDifficulty>,
    pub background_color: Option<String>,
    pub registration_link: Option<String>,
    pub linked_route_id: Option<Uuid>,
}

impl PostDraft {
    /// A draft with only the mandatory fields filled in.
    pub fn new(kind: PostKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            content: content.into(),
            media_reference: None,
            source_reference: None,
            scheduled_at: None,
            tags: BTreeSet::new(),
            author: None,
            emotion: None,
            cause: None,
            location: None,
            coordinates: None,
            distance_km: None,
            duration_minutes: None,
            difficulty: None,
            background_color: None,
            registration_link: None,
            linked_route_id: None,
        }
    }

    pub fn with_media(mut self, media_reference: impl Into<String>) -> Self {
        self.media_reference = Some(media_reference.into());
        self
    }

    pub fn with_source(mut self, source_reference: impl Into<String>) -> Self {
        self.source_reference = Some(source_reference.into());
        self
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
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

    pub fn located_at(mut self, coordinates: GeoPoint) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn linked_to_route(mut self, route_id: Uuid) -> Self {
        self.linked_route_id = Some(route_id);
        self
    }
}

/// Post entity - a piece of feed content that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub kind: PostKind,
    pub title: String,
    pub content: String,
    pub media_reference: Option<String>,
    pub source_reference: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub tags: BTreeSet<String>,
    pub author: Option<String>,
    pub emotion: Option<String>,
    pub cause: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub difficulty: Option<RouteDifficulty>,
    pub background_color: Option<String>,
    pub registration_link: Option<String>,
    pub linked_route_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a post from a draft. Both timestamps start at `now`; the
    /// repository overwrites them on save.
    pub fn from_draft(id: Uuid, draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: draft.kind,
            title: draft.title,
            content: draft.content,
            media_reference: draft.media_reference,
            source_reference: draft.source_reference,
            scheduled_at: draft.scheduled_at,
            tags: draft.tags,
            author: draft.author,
            emotion: draft.emotion,
            cause: draft.cause,
            location: draft.location,
            coordinates: draft.coordinates,
            distance_km: draft.distance_km,
            duration_minutes: draft.duration_minutes,
            difficulty: draft.difficulty,
            background_color: draft.background_color,
            registration_link: draft.registration_link,
            linked_route_id: draft.linked_route_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// The caller-supplied fields of this post.
    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            kind: self.kind,
            title: self.title.clone(),
            content: self.content.clone(),
            media_reference: self.media_reference.clone(),
            source_reference: self.source_reference.clone(),
            scheduled_at: self.scheduled_at,
            tags: self.tags.clone(),
            author: self.author.clone(),
            emotion: self.emotion.clone(),
            cause: self.cause.clone(),
            location: self.location.clone(),
            coordinates: self.coordinates,
            distance_km: self.distance_km,
            duration_minutes: self.duration_minutes,
            difficulty: self.difficulty,
            background_color: self.background_color.clone(),
            registration_link: self.registration_link.clone(),
            linked_route_id: self.linked_route_id,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_collapse_duplicates() {
        let draft = PostDraft::new(PostKind::Article, "Breathe", "Slowly")
            .with_tags(["calm", "breathing", "calm"]);
        assert_eq!(draft.tags.len(), 2);
    }

    #[test]
    fn test_draft_round_trips_through_post() {
        let draft = PostDraft::new(PostKind::Route, "Canal loop", "Flat and shaded")
            .with_tags(["walk"])
            .located_at(GeoPoint::new(48.87, 2.36));
        let post = Post::from_draft(Uuid::new_v4(), draft.clone(), Utc::now());
        assert_eq!(post.to_draft(), draft);
        assert!(post.has_tag("walk"));
        assert!(!post.has_tag("wal"));
    }
}
