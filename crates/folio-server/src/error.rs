use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors that map directly to HTTP responses.
///
/// Every variant implements [`IntoResponse`] so Axum handlers can use
/// `Result<impl IntoResponse, AppError>` as their return type. All bodies
/// share the `{ success, data?, error?, message? }` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation failure; the message names the offending field(s). Never
    /// logged as a server fault.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Bad credentials or missing/expired session.
    #[error("{0}")]
    Unauthorized(String),

    /// Persistence fault. `message` is the generic string the caller sees;
    /// the underlying detail is logged server-side only.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Wrap a persistence fault with the caller-facing generic message.
    /// Usable directly in `map_err`:
    /// `.map_err(AppError::internal("Failed to fetch skills"))`.
    pub fn internal(message: impl Into<String>) -> impl FnOnce(anyhow::Error) -> AppError {
        let message = message.into();
        move |source| AppError::Internal { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": msg }),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": msg }),
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "message": msg }),
            ),
            AppError::Internal { message, source } => {
                tracing::error!(error = %source, "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": message }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
