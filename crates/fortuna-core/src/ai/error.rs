//! Completion client errors

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    /// Connection, TLS, timeout, or body read failure
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with a non-2xx status
    #[error("{provider} API error {status}: {body}")]
    Status {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Provider answered 2xx with a body we could not parse
    #[error("could not decode {provider} response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The client task panicked or was cancelled before producing a reply
    #[error("completion task aborted: {0}")]
    Aborted(String),
}

impl CompletionError {
    /// True for rejected or missing credentials
    pub fn is_auth(&self) -> bool {
        match self {
            // Gemini reports a bad key as 400 with reason API_KEY_INVALID
            CompletionError::Status { status, body, .. } => {
                *status == StatusCode::UNAUTHORIZED
                    || *status == StatusCode::FORBIDDEN
                    || body.contains("API_KEY_INVALID")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        let unauthorized = CompletionError::Status {
            provider: "openai",
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        let server = CompletionError::Status {
            provider: "openai",
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        let gemini_bad_key = CompletionError::Status {
            provider: "gemini",
            status: StatusCode::BAD_REQUEST,
            body: concat!(
                r#"{"error":{"status":"INVALID_ARGUMENT","#,
                r#""details":[{"reason":"API_KEY_INVALID"}]}}"#,
            )
            .into(),
        };
        assert!(unauthorized.is_auth());
        assert!(gemini_bad_key.is_auth());
        assert!(!server.is_auth());
        assert!(!CompletionError::Aborted("boom".into()).is_auth());
    }
}
