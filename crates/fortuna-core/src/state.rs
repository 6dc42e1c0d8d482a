//! UI-agnostic chat state types
//!
//! Shared by every front end (the terminal page, the headless `ask` command)
//! and independent of any UI framework.

use serde::{Deserialize, Serialize};

/// A single message in the visitor/assistant conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn visitor(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Visitor,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Visitor,
    Assistant,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::Visitor => "You",
            ChatRole::Assistant => "Assistant",
        }
    }
}
