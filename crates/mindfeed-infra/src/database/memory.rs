//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use mindfeed_core::domain::{FeedFilter, Post};
use mindfeed_core::error::RepoError;
use mindfeed_core::ports::{BaseRepository, PostRepository};

/// Post repository backed by a `HashMap` behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let now = Utc::now();

        post.created_at = store.get(&post.id).map_or(now, |stored| stored.created_at);
        post.updated_at = now;
        store.insert(post.id, post.clone());

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_filter(&self, filter: &FeedFilter) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(filter.apply(store.values().cloned()))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.store.read().await.contains_key(&id))
    }
}
