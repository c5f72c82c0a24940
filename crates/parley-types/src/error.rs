use thiserror::Error;

use crate::llm::LlmError;

/// Errors from conversation store operations (used by the trait definition
/// in parley-core; implementations live in parley-infra).
///
/// A persistence failure never aborts a chat response: the chat flow logs it
/// and still returns the completion reply. History reads that fail surface
/// this error directly.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors that abort a user-visible chat response.
///
/// Deliberately excludes persistence failures -- those degrade gracefully
/// (see [`PersistenceError`]).
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),
}
