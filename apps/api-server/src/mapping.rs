//! Conversions between wire DTOs and domain types.

use mindfeed_core::domain::{
    DateRange, FeedFilter, GeoPoint, GeoRadius, Post, PostDraft, PostKind, RouteDifficulty,
};
use mindfeed_shared::dto::{FeedQuery, PostRequest, PostResponse};

use crate::middleware::error::AppError;

pub fn draft_from_request(req: PostRequest) -> Result<PostDraft, AppError> {
    let kind = parse_kind(&req.kind)?;
    let difficulty = req
        .difficulty
        .as_deref()
        .map(str::parse::<RouteDifficulty>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let coordinates = coordinates(req.latitude, req.longitude)?;

    Ok(PostDraft {
        kind,
        title: req.title,
        content: req.content,
        media_reference: req.media_reference,
        source_reference: req.source_reference,
        scheduled_at: req.scheduled_at,
        tags: req.tags.into_iter().collect(),
        author: req.author,
        emotion: req.emotion,
        cause: req.cause,
        location: req.location,
        coordinates,
        distance_km: req.distance_km,
        duration_minutes: req.duration_minutes,
        difficulty,
        background_color: req.background_color,
        registration_link: req.registration_link,
        linked_route_id: req.linked_route_id,
    })
}

pub fn response_from_post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        kind: post.kind.to_string(),
        title: post.title,
        content: post.content,
        media_reference: post.media_reference,
        source_reference: post.source_reference,
        scheduled_at: post.scheduled_at,
        tags: post.tags.into_iter().collect(),
        author: post.author,
        emotion: post.emotion,
        cause: post.cause,
        location: post.location,
        latitude: post.coordinates.map(|c| c.lat),
        longitude: post.coordinates.map(|c| c.lng),
        distance_km: post.distance_km,
        duration_minutes: post.duration_minutes,
        difficulty: post.difficulty.map(|d| d.to_string()),
        background_color: post.background_color,
        registration_link: post.registration_link,
        linked_route_id: post.linked_route_id,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn responses_from_posts(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(response_from_post).collect()
}

pub fn filter_from_query(query: FeedQuery) -> Result<FeedFilter, AppError> {
    let kind = query.kind.as_deref().map(parse_kind).transpose()?;
    let created = (query.from.is_some() || query.to.is_some()).then_some(DateRange {
        from: query.from,
        to: query.to,
    });
    let near = match (coordinates(query.lat, query.lng)?, query.radius_meters) {
        (Some(center), Some(radius)) if radius >= 0.0 => Some(GeoRadius::new(center, radius)),
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "radius_meters must not be negative".to_string(),
            ));
        }
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "lat, lng and radius_meters must be given together".to_string(),
            ));
        }
    };

    Ok(FeedFilter {
        kind,
        tag: query.tag,
        emotion: query.emotion,
        cause: query.cause,
        created,
        near,
        linked_route_id: query.route_id,
        limit: query.limit,
    })
}

pub fn parse_kind(raw: &str) -> Result<PostKind, AppError> {
    raw.parse()
        .map_err(|e: mindfeed_core::domain::UnknownPostKind| AppError::BadRequest(e.to_string()))
}

fn coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<Option<GeoPoint>, AppError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(GeoPoint::new(lat, lng))),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "latitude and longitude must be given together".to_string(),
        )),
    }
}
