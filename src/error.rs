use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::db::DbLockError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce the JSON error shape the mini-app
/// client expects: `{"status": "error", "message": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A malformed or missing required field in an inbound payload.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced user or lesson does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A storage operation failed. The caller (the payment processor
    /// retries on non-2xx) sees a generic failure, details go to the log.
    #[error("Storage error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// The database lock could not be acquired.
    #[error(transparent)]
    DbLock(#[from] DbLockError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} not found", entity))
            }
            ApiError::Persistence(rusqlite::Error::QueryReturnedNoRows) => {
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            ApiError::Persistence(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::DbLock(err) => {
                tracing::error!(error = %err, "Database lock error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "status": "error",
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
