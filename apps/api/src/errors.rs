use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::news_client::messages::SUBMIT_FAILED_FALLBACK;
use crate::news_client::NewsServiceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A newer template load superseded this one.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Template load failed: {0}")]
    TemplateLoad(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("News service error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps a news service failure to a fixed user-facing message. A remote
    /// 404 stays a 404.
    pub fn remote(err: NewsServiceError, message: &str) -> Self {
        if err.is_not_found() {
            return AppError::NotFound(message.to_string());
        }
        tracing::error!("News service error: {err}");
        AppError::Upstream(message.to_string())
    }

    /// Maps a failed submission, keeping the service's own message when it
    /// sent one.
    pub fn submission(err: NewsServiceError) -> Self {
        tracing::error!("Submission failed: {err}");
        let message = err
            .remote_message()
            .unwrap_or(SUBMIT_FAILED_FALLBACK)
            .to_string();
        AppError::Submission(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "STALE_TEMPLATE_LOAD", msg.clone()),
            AppError::TemplateLoad(msg) => {
                (StatusCode::BAD_GATEWAY, "TEMPLATE_LOAD_FAILED", msg.clone())
            }
            AppError::Submission(msg) => (StatusCode::BAD_GATEWAY, "SUBMISSION_FAILED", msg.clone()),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if matches!(self, AppError::TemplateLoad(_)) {
            error["retryable"] = json!(true);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
