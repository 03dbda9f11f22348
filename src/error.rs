//! Application error taxonomy and its HTTP mapping
//!
//! Store operations and handlers share a single error type. Validation,
//! conflict and not-found failures carry a user-facing message that goes
//! straight into the JSON body; storage failures are logged server-side
//! and surfaced only as a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or empty required input → 400
    #[error("{0}")]
    Validation(String),

    /// Duplicate key on create → 409
    #[error("{0}")]
    Conflict(String),

    /// Missing row, item or sheet file → 404
    #[error("{0}")]
    NotFound(String),

    /// Malformed sheet contents → 500
    #[error("sheet error: {0}")]
    Csv(#[from] csv::Error),

    /// Local disk I/O failure → 500
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Csv(_) | AppError::Io(_) => {
                // Full cause stays in the server log only
                tracing::error!(error = %self, "storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
