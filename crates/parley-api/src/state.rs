//! Application state wiring the chat service together.
//!
//! The chat service is generic over the store and provider traits; AppState
//! pins it to the concrete infra implementations.

use std::sync::Arc;

use anyhow::Context;

use parley_core::conversation::service::{ChatService, ChatSettings};
use parley_infra::config::{load_config, resolve_data_dir};
use parley_infra::llm::openai_compat::OpenAiCompatibleProvider;
use parley_infra::sqlite::conversation::SqliteConversationStore;
use parley_infra::sqlite::pool::DatabasePool;
use parley_types::config::AppConfig;

/// Concrete type alias for the service generics pinned to infra
/// implementations.
pub type ConcreteChatService = ChatService<SqliteConversationStore, OpenAiCompatibleProvider>;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, construct the completion provider, wire the chat service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let provider = build_provider(&config)?;

        let store = SqliteConversationStore::new(db_pool);
        let chat_service = ChatService::new(store, provider, ChatSettings::from_config(&config));

        Ok(Self {
            chat_service: Arc::new(chat_service),
        })
    }
}

/// Construct the completion provider from config, reading the API key from
/// the environment variable the config names.
fn build_provider(config: &AppConfig) -> anyhow::Result<OpenAiCompatibleProvider> {
    let api_key = std::env::var(&config.provider.api_key_env).with_context(|| {
        format!(
            "{} environment variable not set",
            config.provider.api_key_env
        )
    })?;

    let provider = match &config.provider.base_url {
        Some(base_url) => {
            OpenAiCompatibleProvider::compatible(base_url, &api_key, &config.provider.model)
        }
        None => OpenAiCompatibleProvider::openai(&api_key, &config.provider.model),
    };

    Ok(provider)
}
