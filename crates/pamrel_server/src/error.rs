//! HTTP error mapping for API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pamrel_core::AppError;
use serde_json::json;

/// [`AppError`] rendered as a JSON `{"error": ...}` response.
#[derive(Debug)]
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl HttpError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidContent(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnsupportedLanguage(lang) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported language: {}", lang),
            ),
            AppError::CapacityExhausted => {
                tracing::error!("Paste id space exhausted");
                (
                    StatusCode::INSUFFICIENT_STORAGE,
                    "Unable to allocate a paste id".to_string(),
                )
            }
            AppError::StorageMessage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            other => {
                tracing::error!("Internal error: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
