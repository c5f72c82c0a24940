//! Application error type mapping to HTTP status codes.
//!
//! Only input validation and completion failures abort a chat response;
//! persistence errors reach this type solely through history reads.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_types::error::{ChatError, PersistenceError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the chat flow.
    Chat(ChatError),
    /// Errors from history reads.
    Persistence(PersistenceError),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<PersistenceError> for AppError {
    fn from(e: PersistenceError) -> Self {
        AppError::Persistence(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Chat(ChatError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                ChatError::EmptyMessage.to_string(),
            ),
            AppError::Chat(err @ ChatError::Completion(_)) => {
                (StatusCode::BAD_GATEWAY, "COMPLETION_FAILED", err.to_string())
            }
            AppError::Persistence(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", err.to_string())
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
