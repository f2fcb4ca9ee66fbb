use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use fleetreg_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and implements [`IntoResponse`]
/// to produce consistent JSON error responses. The error category is mapped
/// to a status code exactly once, here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fleetreg_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND", core.to_string())
                }
                CoreError::UniqueViolation { .. } => (
                    StatusCode::CONFLICT,
                    "UNIQUE_CONSTRAINT_VIOLATION",
                    core.to_string(),
                ),
                CoreError::CreationFailed { .. } => {
                    tracing::error!(error = %core, "Entity creation failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "ENTITY_CREATION_FAILED",
                        core.to_string(),
                    )
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Storage(source) => {
                    tracing::error!(error = %source, "Storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
                CoreError::Publish(source) => {
                    // The record was already durably created; only the
                    // notification is missing.
                    tracing::error!(error = %source, "Creation event publish failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "EVENT_PUBLISH_FAILED",
                        "Vehicle was created but the creation event could not be published"
                            .to_string(),
                    )
                }
            },
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
