//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use scorekeeper_core::TimeBoundError;
use scorekeeper_store::StoreError;

use crate::response::Envelope;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A snapshot file is missing or malformed; the restore transaction has
    /// not partially applied.
    #[error("backup integrity error: {0}")]
    BackupIntegrity(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::BackupIntegrity(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("backup integrity error: {msg}"),
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Envelope::error(status.as_u16(), message);
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity} not found: {id}")),
            StoreError::Snapshot(msg) => Self::BackupIntegrity(msg),
            StoreError::Database(_) | StoreError::Migration(_) | StoreError::Io(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<TimeBoundError> for ApiError {
    fn from(err: TimeBoundError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
