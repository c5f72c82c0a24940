//! Service configuration for Parley.
//!
//! `AppConfig` represents `config.toml` in the data directory. Every field
//! has a default, so an empty or missing file yields a working service.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub provider: ProviderSettings,
}

/// Conversation context settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Persona instruction prepended to every assembled context.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// How many stored turns are replayed per request. Observed deployments
    /// vary (10 and 12 both exist in the wild); this is configuration, not
    /// a law.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Upper bound on the completion dependency call.
    #[serde(default = "default_completion_timeout_ms")]
    pub completion_timeout_ms: u64,
}

fn default_system_prompt() -> String {
    "You are Parley, a friendly conversational assistant. \
     Keep your responses insightful and concise."
        .to_string()
}

fn default_history_window() -> usize {
    10
}

fn default_completion_timeout_ms() -> u64 {
    30_000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            history_window: default_history_window(),
            completion_timeout_ms: default_completion_timeout_ms(),
        }
    }
}

/// Completion dependency settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Override the provider's base URL (any OpenAI-compatible endpoint).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Name of the environment variable holding the API key. The key itself
    /// never lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Maximum tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature; provider default when unset.
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}
