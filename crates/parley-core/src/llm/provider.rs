//! LlmProvider trait definition.
//!
//! The completion dependency is an opaque, fallible, time-bounded service.
//! Implementations live in parley-infra (e.g., `OpenAiCompatibleProvider`);
//! the chat flow wraps every call in a timeout, so implementations do not
//! need their own deadline handling.

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion dependency backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
