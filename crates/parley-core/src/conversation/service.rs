//! Chat orchestration: validate, assemble, complete, persist, reply.
//!
//! A single request moves through: validated input -> assembled context ->
//! completion call (bounded by a timeout) -> turn persistence -> reply.
//! Completion failure aborts the response with no turns written; persistence
//! failure is logged and the reply is still returned.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use parley_types::config::AppConfig;
use parley_types::error::{ChatError, PersistenceError};
use parley_types::identity::Identity;
use parley_types::llm::{CompletionRequest, LlmError, Message};
use parley_types::turn::{Turn, TurnRole};

use crate::conversation::context::ContextAssembler;
use crate::conversation::store::ConversationStore;
use crate::llm::provider::LlmProvider;

/// Settings the chat flow needs, flattened out of [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub system_prompt: String,
    pub history_window: usize,
    pub completion_timeout: Duration,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl ChatSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            system_prompt: config.chat.system_prompt.clone(),
            history_window: config.chat.history_window,
            completion_timeout: Duration::from_millis(config.chat.completion_timeout_ms),
            model: config.provider.model.clone(),
            max_tokens: config.provider.max_tokens,
            temperature: config.provider.temperature,
        }
    }
}

/// Orchestrates the chat flow over a conversation store and a completion
/// provider.
///
/// Generic over both ports to keep parley-core free of infrastructure
/// dependencies (SQLite for production, in-memory for tests).
pub struct ChatService<S: ConversationStore, P: LlmProvider> {
    store: S,
    provider: P,
    assembler: ContextAssembler,
    completion_timeout: Duration,
    model: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl<S: ConversationStore, P: LlmProvider> ChatService<S, P> {
    pub fn new(store: S, provider: P, settings: ChatSettings) -> Self {
        Self {
            store,
            provider,
            assembler: ContextAssembler::new(settings.system_prompt, settings.history_window),
            completion_timeout: settings.completion_timeout,
            model: settings.model,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }

    /// Build the ordered message list for one request: system instruction,
    /// recent turns oldest-first, the new message last.
    ///
    /// Rejects empty/whitespace-only input before any store read. A failed
    /// history read degrades to an empty window rather than aborting -- the
    /// caller still gets a reply, just without context.
    pub async fn build_context(
        &self,
        identity: &Identity,
        new_message: &str,
    ) -> Result<Vec<Message>, ChatError> {
        if new_message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let history = match self
            .store
            .recent(identity, self.assembler.history_window())
            .await
        {
            Ok(turns) => turns,
            Err(err) => {
                warn!(identity = %identity, error = %err, "history read failed, assembling context without history");
                Vec::new()
            }
        };

        Ok(self.assembler.assemble(&history, new_message))
    }

    /// Run one chat exchange and return the reply text.
    ///
    /// Turns are written only after a successful completion response, so a
    /// failed or timed-out call leaves the store untouched. Both the user
    /// turn and the assistant turn are attempted even if one write fails;
    /// neither failure re-invokes the completion call or aborts the reply.
    pub async fn chat(&self, identity: &Identity, message: &str) -> Result<String, ChatError> {
        let context = self.build_context(identity, message).await?;

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: context,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let started = Instant::now();
        let response = match tokio::time::timeout(
            self.completion_timeout,
            self.provider.complete(&request),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ChatError::Completion(err)),
            Err(_) => {
                return Err(ChatError::Completion(LlmError::Timeout {
                    elapsed_ms: self.completion_timeout.as_millis() as u64,
                }));
            }
        };

        info!(
            identity = %identity,
            provider = self.provider.name(),
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            response_ms = started.elapsed().as_millis() as u64,
            "completion finished"
        );

        if let Err(err) = self.store.append(identity, TurnRole::User, message).await {
            warn!(identity = %identity, error = %err, "failed to persist user turn");
        }
        if let Err(err) = self
            .store
            .append(identity, TurnRole::Assistant, &response.content)
            .await
        {
            warn!(identity = %identity, error = %err, "failed to persist assistant turn");
        }

        Ok(response.content)
    }

    /// Full stored history for the identity, ascending order.
    pub async fn history(&self, identity: &Identity) -> Result<Vec<Turn>, PersistenceError> {
        self.store.all(identity).await
    }
}
