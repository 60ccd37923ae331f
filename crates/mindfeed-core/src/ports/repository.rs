use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{FeedFilter, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or replace).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns whether a row was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository.
///
/// `save` owns the timestamps: a new id gets `created_at = updated_at = now`,
/// an existing id keeps its stored `created_at` and gets a fresh `updated_at`.
/// Listings come back in feed order (see [`crate::domain::feed_order`]).
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching every predicate of `filter`, newest first.
    async fn find_by_filter(&self, filter: &FeedFilter) -> Result<Vec<Post>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        self.find_by_filter(&FeedFilter::default()).await
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
