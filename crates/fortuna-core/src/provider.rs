use std::sync::Arc;

use crate::ai::{gemini, openai, ApiKeySource, CompletionService, GeminiClient, OpenAIClient};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAI,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAI => "openai",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Some(Provider::Gemini),
            "openai" | "chatgpt" => Some(Provider::OpenAI),
            _ => None,
        }
    }

    pub fn all() -> Vec<Provider> {
        vec![Provider::Gemini, Provider::OpenAI]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini (Google)",
            Provider::OpenAI => "ChatGPT (OpenAI)",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => gemini::DEFAULT_MODEL,
            Provider::OpenAI => openai::DEFAULT_MODEL,
        }
    }

    pub fn list_models(&self) -> Vec<String> {
        match self {
            Provider::Gemini => GeminiClient::list_models(),
            Provider::OpenAI => OpenAIClient::list_models(),
        }
    }

    /// Provider named in the config, falling back to Gemini
    pub fn from_config(config: &Config) -> Self {
        config
            .provider
            .as_deref()
            .and_then(Provider::parse)
            .unwrap_or(Provider::Gemini)
    }
}

/// Build the completion client for `provider`. The model comes from the
/// config when set, otherwise the provider default.
pub fn build_service(provider: Provider, config: &Config) -> Arc<dyn CompletionService> {
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| provider.default_model().to_string());

    match provider {
        Provider::Gemini => {
            let key = ApiKeySource::new(gemini::KEY_ENV_VARS, config.gemini_api_key.clone());
            let base_url = config
                .gemini_base_url
                .as_deref()
                .unwrap_or(gemini::DEFAULT_BASE_URL);
            Arc::new(GeminiClient::with_base_url(base_url, key, &model))
        }
        Provider::OpenAI => {
            let key = ApiKeySource::new(openai::KEY_ENV_VARS, config.openai_api_key.clone());
            let base_url = config
                .openai_base_url
                .as_deref()
                .unwrap_or(openai::DEFAULT_BASE_URL);
            Arc::new(OpenAIClient::with_base_url(base_url, key, &model))
        }
    }
}
