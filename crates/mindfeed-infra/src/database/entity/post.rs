//! Feed post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use mindfeed_core::domain::{GeoPoint, Post, PostKind, RouteDifficulty};
use mindfeed_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feed_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub media_reference: Option<String>,
    pub source_reference: Option<String>,
    pub scheduled_at: Option<DateTimeWithTimeZone>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub emotion: Option<String>,
    pub cause: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub difficulty: Option<String>,
    pub background_color: Option<String>,
    pub registration_link: Option<String>,
    pub linked_route_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
///
/// Fails when a text column holds a value the domain enums do not know.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let kind = model
            .kind
            .parse::<PostKind>()
            .map_err(|e| RepoError::Conversion(format!("post {}: {e}", model.id)))?;
        let difficulty = model
            .difficulty
            .as_deref()
            .map(str::parse::<RouteDifficulty>)
            .transpose()
            .map_err(|e| RepoError::Conversion(format!("post {}: {e}", model.id)))?;
        let coordinates = match (model.latitude, model.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        Ok(Self {
            id: model.id,
            kind,
            title: model.title,
            content: model.content,
            media_reference: model.media_reference,
            source_reference: model.source_reference,
            scheduled_at: model.scheduled_at.map(Into::into),
            tags: model.tags.into_iter().collect(),
            author: model.author,
            emotion: model.emotion,
            cause: model.cause,
            location: model.location,
            coordinates,
            distance_km: model.distance_km,
            duration_minutes: model.duration_minutes,
            difficulty,
            background_color: model.background_color,
            registration_link: model.registration_link,
            linked_route_id: model.linked_route_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            kind: Set(post.kind.as_str().to_string()),
            title: Set(post.title),
            content: Set(post.content),
            media_reference: Set(post.media_reference),
            source_reference: Set(post.source_reference),
            scheduled_at: Set(post.scheduled_at.map(Into::into)),
            tags: Set(post.tags.into_iter().collect()),
            author: Set(post.author),
            emotion: Set(post.emotion),
            cause: Set(post.cause),
            location: Set(post.location),
            latitude: Set(post.coordinates.map(|c| c.lat)),
            longitude: Set(post.coordinates.map(|c| c.lng)),
            distance_km: Set(post.distance_km),
            duration_minutes: Set(post.duration_minutes),
            difficulty: Set(post.difficulty.map(|d| d.as_str().to_string())),
            background_color: Set(post.background_color),
            registration_link: Set(post.registration_link),
            linked_route_id: Set(post.linked_route_id),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
