//! Feed handlers.
//!
//! Every request that may probe a source owns a cancellation token that is
//! cancelled when the handler future is dropped, so an abandoned request does
//! not keep outbound probes alive.

use actix_web::{HttpResponse, web};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use mindfeed_shared::dto::{FeedQuery, PostRequest, ValidationResponse};

use crate::mapping::{
    draft_from_request, filter_from_query, parse_kind, response_from_post, responses_from_posts,
};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/feed
pub async fn list_feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let filter = filter_from_query(query.into_inner())?;
    let posts = state.feed.list(&filter).await?;
    Ok(HttpResponse::Ok().json(responses_from_posts(posts)))
}

/// GET /api/feed/type/{kind}
pub async fn list_by_kind(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let kind = parse_kind(&path.into_inner())?;
    let posts = state.feed.list_by_kind(kind).await?;
    Ok(HttpResponse::Ok().json(responses_from_posts(posts)))
}

/// GET /api/feed/tag/{tag}
pub async fn list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.feed.list_by_tag(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(responses_from_posts(posts)))
}

/// GET /api/feed/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .feed
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(response_from_post(post)))
}

/// POST /api/feed
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = draft_from_request(body.into_inner())?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let post = state.feed.create(draft, &cancel).await?;

    Ok(HttpResponse::Created().json(response_from_post(post)))
}

/// PUT /api/feed/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let draft = draft_from_request(body.into_inner())?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let post = state
        .feed
        .update(id, draft, &cancel)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(response_from_post(post)))
}

/// DELETE /api/feed/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !state.feed.delete(id).await? {
        return Err(AppError::NotFound(format!("Post with id {} not found", id)));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/feed/validate
///
/// Runs the acceptance rules without storing anything.
pub async fn validate_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let draft = draft_from_request(body.into_inner())?;

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    let errors = state
        .feed
        .validate(&draft, &cancel)
        .await
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(HttpResponse::Ok().json(ValidationResponse::from_errors(errors)))
}
