mod traits;
mod claude;
mod openai;
pub mod provider;

pub use traits::*;
pub use claude::ClaudeClient;
pub use openai::OpenAIClient;
pub use provider::{build_client, ModelSelection, ProviderId};
