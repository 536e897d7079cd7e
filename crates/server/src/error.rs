//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every failure to the JSON
//! response envelope. All route handlers return `Result<T, AppError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::extract::ApiMessage;
use crate::services::uploads::UploadError;

/// Application-level error type for the shop API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed field validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Image upload failed.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Repository(err) => match err {
                RepositoryError::Duplicate(message) => (StatusCode::BAD_REQUEST, message),
                RepositoryError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, err.to_string())
                }
                RepositoryError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                RepositoryError::Store(source) => {
                    tracing::error!(error = %source, "store failure while handling request");
                    // Don't expose internal error details to clients
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_owned(),
                    )
                }
            },
            Self::Upload(err) => match err {
                UploadError::Io(source) => {
                    tracing::error!(error = %source, "upload write failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_owned(),
                    )
                }
                other => (StatusCode::BAD_REQUEST, other.to_string()),
            },
        };

        (status, Json(ApiMessage::error(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
