//! History endpoint.
//!
//! GET /history returns the caller's full stored conversation as an ordered
//! array; always `[]` for anonymous callers. The rendering layer is a pure
//! consumer of this shape.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use parley_types::turn::{Turn, TurnRole};

use crate::http::error::AppError;
use crate::http::extractors::identity::CurrentIdentity;
use crate::state::AppState;

/// One history entry on the wire.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: String,
}

impl From<Turn> for HistoryEntry {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.role,
            content: turn.content,
            timestamp: turn.created_at.to_rfc3339(),
        }
    }
}

/// GET /history -- full conversation for the current identity, oldest first.
pub async fn history(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let turns = state.chat_service.history(&identity).await?;
    Ok(Json(turns.into_iter().map(HistoryEntry::from).collect()))
}
