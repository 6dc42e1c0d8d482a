//! Fixtures shared by the terminal tests

use std::sync::Arc;

use async_trait::async_trait;
use fortuna_core::{ChatSession, CompletionError, CompletionService, DispatchOutcome, Provider};
use tokio::sync::mpsc;

use crate::app::App;

/// Answers every prompt with a fixed reply, or fails when it has none
pub struct Scripted {
    reply: Option<String>,
}

impl Scripted {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    pub fn offline() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl CompletionService for Scripted {
    async fn complete(&self, _prompt: &str) -> Result<Option<String>, CompletionError> {
        match &self.reply {
            Some(reply) => Ok(Some(reply.clone())),
            None => Err(CompletionError::Aborted("offline".to_string())),
        }
    }

    fn model(&self) -> &str {
        "test-model"
    }
}

pub fn test_app(service: Scripted) -> (App, mpsc::UnboundedReceiver<DispatchOutcome>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = ChatSession::new(Arc::new(service), tx);
    (App::new(session, Provider::Gemini), rx)
}
