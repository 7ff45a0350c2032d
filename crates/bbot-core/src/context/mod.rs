mod history;
pub mod persistence;

pub use history::Conversation;
pub use persistence::{sanitize_filename, ConversationStore};
