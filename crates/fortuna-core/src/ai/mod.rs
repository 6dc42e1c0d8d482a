pub mod error;
pub mod gemini;
pub mod openai;

pub use error::CompletionError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;

use async_trait::async_trait;

/// A chat-completion backend that turns one prompt into one reply
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send a single-turn prompt. `Ok(None)` means the provider answered
    /// but returned no usable text.
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError>;

    /// Model identifier sent with every request
    fn model(&self) -> &str;
}

/// Where a client finds its API key. Resolved on every call so a key
/// exported after startup is picked up by the next request.
#[derive(Debug, Clone)]
pub struct ApiKeySource {
    env_vars: &'static [&'static str],
    configured: Option<String>,
}

impl ApiKeySource {
    pub fn new(env_vars: &'static [&'static str], configured: Option<String>) -> Self {
        Self { env_vars, configured }
    }

    /// A fixed key that ignores the environment
    pub fn fixed(key: &str) -> Self {
        Self {
            env_vars: &[],
            configured: Some(key.to_string()),
        }
    }

    /// Environment first, then the configured key. An empty key is still
    /// returned so the request goes out and the provider rejects it.
    pub fn resolve(&self) -> String {
        self.env_vars
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
            .or_else(|| self.configured.clone())
            .unwrap_or_default()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_environment() {
        std::env::set_var("FORTUNA_TEST_KEY_PRIMARY", "from-env");
        let source = ApiKeySource::new(&["FORTUNA_TEST_KEY_PRIMARY"], Some("from-config".into()));
        assert_eq!(source.resolve(), "from-env");
        std::env::remove_var("FORTUNA_TEST_KEY_PRIMARY");
    }

    #[test]
    fn test_key_skips_blank_environment_values() {
        std::env::set_var("FORTUNA_TEST_KEY_BLANK", "  ");
        let source = ApiKeySource::new(
            &["FORTUNA_TEST_KEY_BLANK", "FORTUNA_TEST_KEY_UNSET"],
            Some("from-config".into()),
        );
        assert_eq!(source.resolve(), "from-config");
        std::env::remove_var("FORTUNA_TEST_KEY_BLANK");
    }

    #[test]
    fn test_missing_key_resolves_empty() {
        let source = ApiKeySource::new(&["FORTUNA_TEST_KEY_NEVER_SET"], None);
        assert_eq!(source.resolve(), "");
    }
}
