pub mod error;
pub mod constants;
pub mod llm;
pub mod context;
pub mod config;
pub mod session;

// Re-export key types
pub use error::{BbotError, ProviderError};
pub use llm::{LlmClient, Message, ModelSelection, ProviderId, Role};
pub use context::{sanitize_filename, Conversation, ConversationStore};
pub use config::{ChatConfig, Settings};
pub use session::{ChatLog, ChatSession, LogEntry, LogKind, TurnOutcome};
