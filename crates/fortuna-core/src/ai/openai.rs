use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ApiKeySource, CompletionError, CompletionService};

const PROVIDER: &str = "openai";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const KEY_ENV_VARS: &[&str] = &["OPENAI_API_KEY"];

#[derive(Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: ApiKeySource,
}

impl OpenAIClient {
    pub fn with_base_url(base_url: &str, api_key: ApiKeySource, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    pub fn list_models() -> Vec<String> {
        vec![
            "gpt-4o-mini".to_string(),
            "gpt-4o".to_string(),
            "gpt-4.1-mini".to_string(),
            "gpt-4.1".to_string(),
        ]
    }
}

#[async_trait]
impl CompletionService for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let transport = |source| CompletionError::Transport {
            provider: PROVIDER,
            source,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.resolve()))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(CompletionError::Status {
                provider: PROVIDER,
                status,
                body,
            });
        }

        let openai_response: OpenAIResponse =
            serde_json::from_str(&body).map_err(|source| CompletionError::Decode {
                provider: PROVIDER,
                source,
            })?;
        Ok(openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
