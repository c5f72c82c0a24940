//! Chat endpoint.
//!
//! POST /chat with `{"message": "..."}` runs one exchange for the caller's
//! identity and returns `{"reply": "..."}`. Invalid input is a 400,
//! completion failure a 502; a persistence failure after a successful
//! completion is logged upstream and still yields a 200.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::http::extractors::identity::CurrentIdentity;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat -- run one exchange and return the reply.
pub async fn chat(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let reply = state.chat_service.chat(&identity, &body.message).await?;
    Ok(Json(ChatResponse { reply }))
}
