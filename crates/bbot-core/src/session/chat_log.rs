use crate::context::Conversation;
use crate::llm::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    System,
    User,
    Assistant,
    Error,
}

impl LogKind {
    pub fn label(&self) -> &'static str {
        match self {
            LogKind::System => "System",
            LogKind::User => "User",
            LogKind::Assistant => "Assistant",
            LogKind::Error => "Error",
        }
    }
}

impl From<Role> for LogKind {
    fn from(role: Role) -> Self {
        match role {
            Role::System => LogKind::System,
            Role::User => LogKind::User,
            Role::Assistant => LogKind::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub text: String,
}

impl LogEntry {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// `"<Label>: <text>"`, e.g. `"Error: connection refused"`.
    pub fn render(&self) -> String {
        format!("{}: {}", self.kind.label(), self.text)
    }
}

/// The visible transcript. Mirrors the conversation, plus error entries
/// that are never part of it.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    entries: Vec<LogEntry>,
}

impl ChatLog {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Redraw from the conversation. Earlier error entries are dropped.
    pub fn rebuild(&mut self, conversation: &Conversation) {
        self.entries = conversation
            .to_ordered_list()
            .iter()
            .map(|m| LogEntry::new(m.role.into(), m.content.as_str()))
            .collect();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(LogEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
