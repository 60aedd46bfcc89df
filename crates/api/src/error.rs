use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fence_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "error": ..., "code": ... }`; operation
/// failures also carry a `details` string.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fence_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A missing resource or route, reported verbatim.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A request-level operation that failed; `details` is shown to the client.
    #[error("{error}: {details}")]
    OperationFailed {
        error: &'static str,
        details: String,
    },

    /// An internal error with a human-readable message (never sent to clients).
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    None,
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone(), None),
                CoreError::Io(msg) | CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::OperationFailed { error, details } => {
                tracing::error!(error = %error, details = %details, "Operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "OPERATION_FAILED",
                    error.to_string(),
                    Some(details.clone()),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match details {
            Some(details) => json!({ "error": message, "code": code, "details": details }),
            None => json!({ "error": message, "code": code }),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl AppError {
    /// Wrap any displayable failure as an operation failure with details.
    pub fn failed(error: &'static str, details: impl std::fmt::Display) -> Self {
        AppError::OperationFailed {
            error,
            details: details.to_string(),
        }
    }
}
