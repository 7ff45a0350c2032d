mod chat_log;

pub use chat_log::{ChatLog, LogEntry, LogKind};

use std::path::PathBuf;

use crate::config::ChatConfig;
use crate::context::{Conversation, ConversationStore};
use crate::error::Result;
use crate::llm::{build_client, LlmClient, Message, Role};

/// What a send or regenerate command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The provider answered; the reply was appended to the conversation.
    Replied(String),
    /// The provider failed; the message went to the chat log only.
    Failed(String),
    /// Nothing to do (blank input, or no turn to regenerate).
    Skipped,
}

/// Drives one conversation: the command handlers a front end invokes.
///
/// Provider failures never escape `send`/`regenerate`; they become error
/// entries in the chat log. File errors from save/load/delete propagate.
pub struct ChatSession {
    llm: Box<dyn LlmClient>,
    store: ConversationStore,
    conversation: Conversation,
    log: ChatLog,
    system_prompt: String,
}

impl ChatSession {
    pub fn new(
        llm: Box<dyn LlmClient>,
        store: ConversationStore,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            store,
            conversation: Conversation::new(),
            log: ChatLog::default(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Build the provider client and open the history directory.
    pub fn from_config(config: &ChatConfig) -> Result<Self> {
        let store = ConversationStore::open(config.history_dir())?;
        Ok(Self::new(build_client(config), store, config.system_prompt()))
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    pub fn is_empty(&self) -> bool {
        self.conversation.is_empty()
    }

    pub async fn send(&mut self, text: &str) -> TurnOutcome {
        let text = text.trim();
        if text.is_empty() {
            return TurnOutcome::Skipped;
        }

        if self.conversation.is_empty() {
            self.conversation.append(Role::System, self.system_prompt.as_str());
        }
        self.conversation.append(Role::User, text);
        self.log.push(LogEntry::new(LogKind::User, text));

        self.request_reply(text.to_string()).await
    }

    /// Discard the last turn and ask again with the same user message.
    ///
    /// A turn that previously failed has no assistant message, so only the
    /// dangling user message is dropped before re-sending it. Any other tail
    /// (two assistant messages in a row, a trailing system message) is skipped.
    pub async fn regenerate(&mut self) -> TurnOutcome {
        if self.conversation.len() < 2 {
            return TurnOutcome::Skipped;
        }
        let Some(last_user) = self.conversation.last_user_message().cloned() else {
            return TurnOutcome::Skipped;
        };

        let messages = self.conversation.to_ordered_list();
        let ends_with_turn = matches!(
            messages,
            [.., Message { role: Role::User, .. }, Message { role: Role::Assistant, .. }]
        );
        let ends_with_user = matches!(messages, [.., Message { role: Role::User, .. }]);

        if ends_with_turn {
            self.conversation.truncate_last_turn();
        } else if ends_with_user {
            self.conversation.pop_last();
        } else {
            return TurnOutcome::Skipped;
        }

        self.conversation.push(last_user.clone());
        self.log.rebuild(&self.conversation);

        tracing::debug!(len = self.conversation.len(), "regenerating last reply");
        self.request_reply(last_user.content).await
    }

    async fn request_reply(&mut self, latest_user_message: String) -> TurnOutcome {
        let result = self
            .llm
            .generate_reply(self.conversation.to_ordered_list(), &latest_user_message)
            .await;

        match result {
            Ok(reply) => {
                self.conversation.append(Role::Assistant, reply.as_str());
                self.log.rebuild(&self.conversation);
                TurnOutcome::Replied(reply)
            }
            Err(e) => {
                tracing::warn!(model = %self.llm.model(), "provider request failed: {}", e);
                self.log.push(LogEntry::new(LogKind::Error, e.message()));
                TurnOutcome::Failed(e.to_string())
            }
        }
    }

    /// Save the current conversation, then start an empty one.
    pub fn new_chat(&mut self) -> Result<Option<PathBuf>> {
        let saved = self.save()?;
        self.conversation.clear();
        self.log.clear();
        Ok(saved)
    }

    pub fn save(&self) -> Result<Option<PathBuf>> {
        self.store.save(&self.conversation)
    }

    /// Replace the in-memory conversation with a saved one.
    pub fn load(&mut self, filename: &str) -> Result<()> {
        self.conversation = self.store.load(filename)?;
        self.log.rebuild(&self.conversation);
        Ok(())
    }

    pub fn delete(&self, filename: &str) -> Result<()> {
        self.store.delete(filename)
    }

    pub fn list_saved(&self) -> Result<Vec<String>> {
        self.store.list_saved()
    }
}
