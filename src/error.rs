//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// A single field-level validation failure.
///
/// `field` is the path into the submitted body (e.g.
/// `ticket_sectors[0].variations[1].price`), `code` the constraint that
/// failed, `message` a human-readable explanation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range input; carries every violation, not just
    /// the first, so the caller can render them all at once.
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    /// Well-typed input that is semantically unusable (e.g. no sector
    /// yields a positive ticket count).
    #[error("{0}")]
    Domain(String),

    #[error("missing or invalid caller identity")]
    Unauthenticated,

    #[error("not authorized to perform this operation")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "validation_failed",
                    "message": "one or more fields are invalid",
                    "violations": violations,
                }),
            ),
            AppError::Domain(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "domain_error", "message": message }),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "unauthenticated", "message": self.to_string() }),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "error": "forbidden", "message": self.to_string() }),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "not_found", "message": self.to_string() }),
            ),
            // Dependency and internal failures are logged in full here and
            // surfaced as a generic message, never leaking query text or
            // stack detail to the caller.
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal_error", "message": "internal error" }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal_error", "message": "internal error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
