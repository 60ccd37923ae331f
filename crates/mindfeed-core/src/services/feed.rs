//! Feed curation: the entry point for creating, replacing, deleting and
//! listing posts.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::{FeedFilter, Post, PostDraft, PostKind};
use crate::error::DomainError;
use crate::ports::PostRepository;
use crate::validation::{PostValidator, Violation};

/// Validates drafts before they reach storage and serves listings.
///
/// Validation always completes before any repository write, so no storage
/// call is ever interleaved with a source probe. Two concurrent updates of
/// the same post are not ordered here: the last write wins.
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    validator: PostValidator,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostRepository>, validator: PostValidator) -> Self {
        Self { posts, validator }
    }

    /// Dry run of the acceptance rules.
    pub async fn validate(&self, draft: &PostDraft, cancel: &CancellationToken) -> Vec<Violation> {
        self.validator.validate_with_cancel(draft, cancel).await
    }

    /// Validate and store a new post.
    pub async fn create(
        &self,
        draft: PostDraft,
        cancel: &CancellationToken,
    ) -> Result<Post, DomainError> {
        self.ensure_valid(&draft, cancel).await?;

        let post = Post::from_draft(Uuid::new_v4(), draft, Utc::now());
        let saved = self.posts.save(post).await?;
        tracing::info!(post_id = %saved.id, kind = %saved.kind, "Post created");
        Ok(saved)
    }

    /// Replace an existing post with a fully re-validated draft.
    ///
    /// Returns `Ok(None)` when no post has this id.
    pub async fn update(
        &self,
        id: Uuid,
        draft: PostDraft,
        cancel: &CancellationToken,
    ) -> Result<Option<Post>, DomainError> {
        let Some(existing) = self.posts.find_by_id(id).await? else {
            tracing::debug!(post_id = %id, "Update target not found");
            return Ok(None);
        };

        self.ensure_valid(&draft, cancel).await?;

        let replacement = Post::from_draft(id, draft, existing.created_at);
        let saved = self.posts.save(replacement).await?;
        tracing::info!(post_id = %saved.id, kind = %saved.kind, "Post updated");
        Ok(Some(saved))
    }

    /// Remove a post. Returns `false` when there was nothing to remove.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        if !self.posts.exists(id).await? {
            tracing::debug!(post_id = %id, "Delete target not found");
            return Ok(false);
        }

        let removed = self.posts.delete(id).await?;
        if removed {
            tracing::info!(post_id = %id, "Post deleted");
        }
        Ok(removed)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.find_by_id(id).await?)
    }

    pub async fn list(&self, filter: &FeedFilter) -> Result<Vec<Post>, DomainError> {
        tracing::debug!(?filter, "Listing posts");
        Ok(self.posts.find_by_filter(filter).await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn list_by_kind(&self, kind: PostKind) -> Result<Vec<Post>, DomainError> {
        self.list(&FeedFilter::by_kind(kind)).await
    }

    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Post>, DomainError> {
        self.list(&FeedFilter::by_tag(tag)).await
    }

    pub async fn list_by_emotion(&self, emotion: &str) -> Result<Vec<Post>, DomainError> {
        self.list(&FeedFilter::by_emotion(emotion)).await
    }

    pub async fn list_by_cause(&self, cause: &str) -> Result<Vec<Post>, DomainError> {
        self.list(&FeedFilter::by_cause(cause)).await
    }

    pub async fn list_by_route(&self, route_id: Uuid) -> Result<Vec<Post>, DomainError> {
        self.list(&FeedFilter::by_route(route_id)).await
    }

    async fn ensure_valid(
        &self,
        draft: &PostDraft,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let violations = self.validator.validate_with_cancel(draft, cancel).await;
        if violations.is_empty() {
            return Ok(());
        }

        tracing::info!(
            kind = %draft.kind,
            violations = violations.len(),
            "Post rejected by validation"
        );
        Err(DomainError::ValidationFailed(violations))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Duration;
    use tokio::sync::Mutex;

    use super::*;
    use crate::error::RepoError;
    use crate::ports::{BaseRepository, ReachabilityProbe};
    use crate::validation::{KeywordHumanDetector, ValidationPolicy, default_event_cutoff};

    /// Minimal repository with the same timestamp contract as the real adapters.
    #[derive(Default)]
    struct MockPostRepository {
        rows: Mutex<HashMap<Uuid, Post>>,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for MockPostRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.lock().await.get(&id).cloned())
        }

        async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().await;
            let now = Utc::now();
            post.created_at = rows.get(&post.id).map_or(now, |p| p.created_at);
            post.updated_at = now;
            rows.insert(post.id, post.clone());
            Ok(post)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
            Ok(self.rows.lock().await.remove(&id).is_some())
        }
    }

    #[async_trait]
    impl PostRepository for MockPostRepository {
        async fn find_by_filter(&self, filter: &FeedFilter) -> Result<Vec<Post>, RepoError> {
            let rows = self.rows.lock().await;
            Ok(filter.apply(rows.values().cloned()))
        }
    }

    struct AlwaysReachable;

    #[async_trait]
    impl ReachabilityProbe for AlwaysReachable {
        async fn is_reachable(&self, _url: &str, _cancel: &CancellationToken) -> bool {
            true
        }
    }

    fn service() -> (FeedService, Arc<MockPostRepository>) {
        let repo = Arc::new(MockPostRepository::default());
        let validator = PostValidator::new(
            Arc::new(KeywordHumanDetector::new()),
            Arc::new(AlwaysReachable),
            ValidationPolicy::default(),
        );
        (FeedService::new(repo.clone(), validator), repo)
    }

    fn event() -> PostDraft {
        PostDraft::new(PostKind::Event, "Sunrise walk", "Meet at the park gate")
            .scheduled_at(default_event_cutoff() + Duration::days(10))
            .with_tags(["outdoors"])
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (service, _) = service();
        let draft = event().with_emotion("ANXIOUS");
        let cancel = CancellationToken::new();

        let created = service.create(draft.clone(), &cancel).await.unwrap();
        let found = service.get(created.id).await.unwrap().unwrap();

        assert_eq!(found.to_draft(), draft);
        assert_eq!(found.id, created.id);
        assert!(found.updated_at >= found.created_at);
    }

    #[tokio::test]
    async fn test_rejected_create_persists_nothing() {
        let (service, repo) = service();
        let draft = PostDraft::new(PostKind::Event, "Past", "Already happened")
            .with_media("crowd-of-people.jpg");

        let err = service
            .create(draft, &CancellationToken::new())
            .await
            .unwrap_err();

        match &err {
            DomainError::ValidationFailed(violations) => assert_eq!(violations.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.violation_messages().len(), 2);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_post_returns_none() {
        let (service, repo) = service();
        let result = service
            .update(Uuid::new_v4(), event(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_post_and_keeps_creation_time() {
        let (service, _) = service();
        let cancel = CancellationToken::new();
        let created = service.create(event().with_cause("WORK"), &cancel).await.unwrap();

        let replacement = PostDraft::new(PostKind::Article, "Rewritten", "New body");
        let updated = service
            .update(created.id, replacement.clone(), &cancel)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.to_draft(), replacement);
        assert!(updated.cause.is_none());
    }

    #[tokio::test]
    async fn test_update_is_revalidated() {
        let (service, _) = service();
        let cancel = CancellationToken::new();
        let created = service.create(event(), &cancel).await.unwrap();

        let mut invalid = event();
        invalid.scheduled_at = None;
        let err = service.update(created.id, invalid, &cancel).await.unwrap_err();

        assert!(matches!(err, DomainError::ValidationFailed(_)));
        let stored = service.get(created.id).await.unwrap().unwrap();
        assert!(stored.scheduled_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_a_row_was_removed() {
        let (service, _) = service();
        let created = service
            .create(event(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(!service.delete(Uuid::new_v4()).await.unwrap());
        assert_eq!(service.list_all().await.unwrap().len(), 1);

        assert!(service.delete(created.id).await.unwrap());
        assert!(service.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_kind_returns_newest_event_first() {
        let (service, _) = service();
        let cancel = CancellationToken::new();
        service
            .create(PostDraft::new(PostKind::Article, "a", "b"), &cancel)
            .await
            .unwrap();
        let first_event = service.create(event(), &cancel).await.unwrap();
        service
            .create(PostDraft::new(PostKind::Quote, "q", "r"), &cancel)
            .await
            .unwrap();

        let events = service.list_by_kind(PostKind::Event).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, first_event.id);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second_event = service.create(event(), &cancel).await.unwrap();

        let events = service.list_by_kind(PostKind::Event).await.unwrap();
        let ids: Vec<Uuid> = events.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second_event.id, first_event.id]);
    }

    #[tokio::test]
    async fn test_list_by_tag_emotion_cause_and_route() {
        let (service, _) = service();
        let cancel = CancellationToken::new();
        let route = Uuid::new_v4();
        let walk = service
            .create(
                PostDraft::new(PostKind::Route, "Riverside", "5 km loop")
                    .with_tags(["walk", "river"])
                    .with_emotion("STRESSED")
                    .with_cause("WORK")
                    .linked_to_route(route),
                &cancel,
            )
            .await
            .unwrap();
        service
            .create(
                PostDraft::new(PostKind::Quote, "Calm", "Breathe").with_tags(["walking"]),
                &cancel,
            )
            .await
            .unwrap();

        let ids = |posts: Vec<Post>| posts.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(service.list_by_tag("walk").await.unwrap()), vec![walk.id]);
        assert_eq!(ids(service.list_by_emotion("STRESSED").await.unwrap()), vec![walk.id]);
        assert_eq!(ids(service.list_by_cause("WORK").await.unwrap()), vec![walk.id]);
        assert_eq!(ids(service.list_by_route(route).await.unwrap()), vec![walk.id]);
        assert_eq!(service.list_all().await.unwrap().len(), 2);
    }
}
