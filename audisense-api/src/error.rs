//! Error types for audisense-api
//!
//! Every handler failure becomes a JSON envelope:
//! `{"error": {"code": "...", "message": "...", "fields": {...}}}`.
//! `fields` is present only for validation failures.

use crate::store::StoreError;
use audisense_common::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// One or more request fields violate their constraints (400)
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Path id is not an integer (400)
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Body is not a JSON object of the expected shape (400)
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Store failure (500)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_code, fields) = match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", None),
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", Some(errors))
            }
            ApiError::InvalidId(_) => (StatusCode::BAD_REQUEST, "INVALID_ID", None),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY", None),
            ApiError::Store(ref err) => {
                error!("Unhandled store failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None)
            }
        };

        let body = match fields {
            Some(fields) => json!({
                "error": {
                    "code": error_code,
                    "message": message,
                    "fields": fields,
                }
            }),
            None => json!({
                "error": {
                    "code": error_code,
                    "message": message,
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
