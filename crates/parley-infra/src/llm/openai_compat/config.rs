//! Configuration for OpenAI-compatible completion providers.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible completion provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. The API key is
/// wrapped in [`SecretString`] so it never appears in Debug output or logs.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key: SecretString::from(api_key.to_string()),
        model: model.into(),
    }
}

/// Configuration for any other endpoint speaking the OpenAI chat protocol
/// (self-hosted gateways, proxies, compatible vendors).
pub fn compatible_defaults(base_url: &str, api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai_compatible".into(),
        base_url: base_url.into(),
        api_key: SecretString::from(api_key.to_string()),
        model: model.into(),
    }
}
