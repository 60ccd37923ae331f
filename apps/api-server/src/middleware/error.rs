//! Handler errors rendered as RFC 7807 problem documents.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use mindfeed_core::DomainError;
use mindfeed_core::error::RepoError;
use mindfeed_shared::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// Details stay in the log; clients get a bare 500.
    #[error("internal error: {0}")]
    Internal(String),

    /// One message per failed publication rule.
    #[error("post rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),
}

impl AppError {
    fn problem(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Internal(_) => ErrorResponse::internal_error(),
            AppError::Rejected(errors) => ErrorResponse::validation_failed(errors.clone()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!(detail = %detail, "Request failed");
        }
        HttpResponse::build(self.status_code()).json(self.problem())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::ValidationFailed(_) => AppError::Rejected(err.violation_messages()),
            DomainError::Repository(repo) => repo.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        if let RepoError::Connection(_) = err {
            tracing::error!(error = %err, "Post store unavailable");
        }
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
