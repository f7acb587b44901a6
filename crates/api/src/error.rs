use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notekeeper_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and implements [`IntoResponse`] to produce consistent
/// JSON error responses. Malformed requests never get here: axum's extractor
/// rejections answer them directly.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `notekeeper_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Expected outcome for a missing id: not logged as an error.
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            // Details stay in the logs; the client gets a sanitized message.
            AppError::Core(CoreError::Storage(msg)) => {
                tracing::error!(error = %msg, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
