//! Review Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::access::AccessDenied;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type ReviewResult<T> = Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Review not found")]
    NotFound,

    /// One review per account and product
    #[error("You have already reviewed this product")]
    AlreadyReviewed,

    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReviewError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReviewError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ReviewError::NotFound => StatusCode::NOT_FOUND,
            ReviewError::AlreadyReviewed => StatusCode::CONFLICT,
            ReviewError::Forbidden(_) => StatusCode::FORBIDDEN,
            ReviewError::Database(_) | ReviewError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::InvalidInput(_) => ErrorKind::BadRequest,
            ReviewError::NotFound => ErrorKind::NotFound,
            ReviewError::AlreadyReviewed => ErrorKind::Conflict,
            ReviewError::Forbidden(_) => ErrorKind::Forbidden,
            ReviewError::Database(_) | ReviewError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            ReviewError::Database(e) => {
                tracing::error!(error = %e, "Review database error");
            }
            ReviewError::Internal(msg) => {
                tracing::error!(message = %msg, "Review internal error");
            }
            ReviewError::Forbidden(denied) => {
                tracing::warn!(action = denied.action.as_str(), "Review access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Review error");
            }
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ReviewError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => ReviewError::InvalidInput(err.message().to_string()),
            _ => ReviewError::Internal(err.to_string()),
        }
    }
}
