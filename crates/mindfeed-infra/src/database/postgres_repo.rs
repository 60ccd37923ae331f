//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Iterable, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use mindfeed_core::domain::{FeedFilter, Post};
use mindfeed_core::error::RepoError;
use mindfeed_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, read_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Every column a replacement overwrites; `id` is the conflict target and
/// `created_at` keeps the value of the first insert.
fn replaceable_columns() -> impl Iterator<Item = post::Column> {
    post::Column::iter().filter(|c| !matches!(c, post::Column::Id | post::Column::CreatedAt))
}

/// SQL translation of every [`FeedFilter`] predicate except the geo radius.
pub(crate) fn condition_for(filter: &FeedFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(kind) = filter.kind {
        condition = condition.add(post::Column::Kind.eq(kind.as_str()));
    }
    if let Some(tag) = &filter.tag {
        condition = condition.add(Expr::cust_with_values("? = ANY(\"tags\")", [tag.clone()]));
    }
    if let Some(emotion) = &filter.emotion {
        condition = condition.add(post::Column::Emotion.eq(emotion.clone()));
    }
    if let Some(cause) = &filter.cause {
        condition = condition.add(post::Column::Cause.eq(cause.clone()));
    }
    if let Some(route_id) = filter.linked_route_id {
        condition = condition.add(post::Column::LinkedRouteId.eq(route_id));
    }
    if let Some(range) = filter.created {
        if let Some(from) = range.from {
            condition = condition.add(post::Column::CreatedAt.gte(from));
        }
        if let Some(to) = range.to {
            condition = condition.add(post::Column::CreatedAt.lte(to));
        }
    }

    condition
}

/// Filtered, feed-ordered select. The limit is only pushed down when no
/// predicate is left to evaluate in process.
pub(crate) fn select_for(filter: &FeedFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find()
        .filter(condition_for(filter))
        .order_by_desc(post::Column::CreatedAt)
        .order_by_asc(post::Column::Id);

    if filter.near.is_none() {
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }
    }

    query
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.find_model(id).await?.map(Post::try_from).transpose()
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let now = Utc::now();
        let mut model: post::ActiveModel = post.into();
        model.created_at = sea_orm::Set(now.into());
        model.updated_at = sea_orm::Set(now.into());

        let on_conflict = OnConflict::column(post::Column::Id)
            .update_columns(replaceable_columns())
            .to_owned();

        let saved = self.upsert_model(model, on_conflict).await?;
        tracing::debug!(post_id = %saved.id, "Post row written");
        Post::try_from(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        self.delete_model(id).await
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_filter(&self, filter: &FeedFilter) -> Result<Vec<Post>, RepoError> {
        let rows = select_for(filter)
            .all(&self.db)
            .await
            .map_err(read_error)?;

        let posts = rows
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        // Geo radius is evaluated here; `apply` also re-sorts and truncates.
        if filter.near.is_some() {
            return Ok(filter.apply(posts));
        }
        Ok(posts)
    }
}
