pub mod ai;
pub mod composer;
pub mod config;
pub mod persona;
pub mod provider;
pub mod session;
pub mod state;
pub mod transcript;

// Re-export main types for convenience
pub use ai::{CompletionError, CompletionService, GeminiClient, OpenAIClient};
pub use composer::Composer;
pub use config::Config;
pub use provider::{build_service, Provider};
pub use session::{ask, ChatSession, DispatchId, DispatchOutcome};
pub use state::{ChatMessage, ChatRole};
pub use transcript::Transcript;
