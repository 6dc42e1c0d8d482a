use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ApiKeySource, CompletionError, CompletionService};

const PROVIDER: &str = "gemini";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variables checked for a key, in order
pub const KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Text parts of the first candidate joined together, skipping thought
    /// summaries. `None` when the candidate carries no text at all.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let texts: Vec<String> = content
            .parts
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: ApiKeySource,
}

impl GeminiClient {
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
            "gemini-2.5-flash".to_string(),
            "gemini-2.5-pro".to_string(),
            "gemini-2.5-flash-lite".to_string(),
            "gemini-2.0-flash".to_string(),
        ]
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, CompletionError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let transport = |source| CompletionError::Transport {
            provider: PROVIDER,
            source,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.resolve())
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

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body).map_err(|source| CompletionError::Decode {
                provider: PROVIDER,
                source,
            })?;
        Ok(gemini_response.into_text())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::test_support::serve_once;

    fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<GeminiResponse>(body).unwrap().into_text()
    }

    #[test]
    fn test_joins_text_parts_of_first_candidate() {
        let body = r#"{"candidates":[
            {"content":{"role":"model","parts":[{"text":"We build "},{"text":"low-code apps."}]}},
            {"content":{"role":"model","parts":[{"text":"ignored"}]}}
        ]}"#;
        assert_eq!(parse(body).as_deref(), Some("We build low-code apps."));
    }

    #[test]
    fn test_skips_thought_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"thinking about it","thought":true},
            {"text":"Answer."}
        ]}}]}"#;
        assert_eq!(parse(body).as_deref(), Some("Answer."));
    }

    #[test]
    fn test_absent_text_is_none() {
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"candidates":[]}"#), None);
        assert_eq!(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#), None);
        assert_eq!(parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#), None);
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_model_and_key() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello!"}]}}]}"#,
        )
        .await;
        let client = GeminiClient::with_base_url(
            &base_url,
            ApiKeySource::fixed("test-key"),
            "gemini-2.5-flash",
        );

        let reply = client.complete("Say hello").await.unwrap();
        assert_eq!(reply.as_deref(), Some("Hello!"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent "));
        assert!(request.to_lowercase().contains("x-goog-api-key: test-key"));
        let expected = r#"{"contents":[{"role":"user","parts":[{"text":"Say hello"}]}]}"#;
        assert!(request.contains(expected));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (base_url, server) = serve_once(
            "400 Bad Request",
            concat!(
                r#"{"error":{"code":400,"message":"API key not valid.","#,
                r#""status":"INVALID_ARGUMENT","details":[{"reason":"API_KEY_INVALID"}]}}"#,
            ),
        )
        .await;
        let client =
            GeminiClient::with_base_url(&base_url, ApiKeySource::fixed(""), DEFAULT_MODEL);

        let err = client.complete("Hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Status { status, .. } if status.as_u16() == 400));
        assert!(err.is_auth());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, server) = serve_once("200 OK", "not json").await;
        let client =
            GeminiClient::with_base_url(&base_url, ApiKeySource::fixed("k"), DEFAULT_MODEL);

        let err = client.complete("Hi").await.unwrap_err();
        assert!(matches!(err, CompletionError::Decode { .. }));
        server.await.unwrap();
    }
}
