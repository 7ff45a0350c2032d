use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::constants::defaults;
use crate::context::Conversation;
use crate::error::{BbotError, Result};
use crate::llm::Message;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_\s-]").expect("static regex is valid"))
}

/// Turn free text into a short file stem.
///
/// Keeps letters, digits, underscores and hyphens, turns spaces into underscores, drops
/// every other character (punctuation, newlines, tabs) and keeps at most
/// 20 characters.
pub fn sanitize_filename(text: &str) -> String {
    disallowed_chars()
        .replace_all(text, "")
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .take(defaults::MAX_FILENAME_CHARS)
        .collect()
}

/// Stores conversations as pretty-printed JSON files in one directory.
pub struct ConversationStore {
    base_dir: PathBuf,
}

impl ConversationStore {
    /// Open the store, creating the directory if needed.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, stem: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", stem, defaults::HISTORY_EXTENSION))
    }

    /// Resolve a user-supplied file name inside the store directory.
    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename);
        let is_plain = name.components().count() == 1
            && name.file_name().map(|n| n == name.as_os_str()).unwrap_or(false);
        if !is_plain {
            return Err(BbotError::config(format!(
                "Invalid conversation file name: {filename}"
            )));
        }
        Ok(self.base_dir.join(name))
    }

    /// First free path for `stem`: `<stem>.json`, then `<stem>_1.json`, ...
    fn unique_path(&self, stem: &str) -> PathBuf {
        let mut path = self.file_path(stem);
        let mut counter = 1;
        while path.exists() {
            path = self.file_path(&format!("{stem}_{counter}"));
            counter += 1;
        }
        path
    }

    fn stem_for(conversation: &Conversation) -> String {
        // Index 0 is the system message; index 1 is the first user message.
        let stem = conversation
            .to_ordered_list()
            .get(1)
            .map(|m| sanitize_filename(&m.content))
            .unwrap_or_default();
        if stem.is_empty() {
            defaults::FALLBACK_STEM.to_string()
        } else {
            stem
        }
    }

    /// Write `conversation` to a new file. Returns `None` for an empty
    /// conversation, which is never saved.
    pub fn save(&self, conversation: &Conversation) -> Result<Option<PathBuf>> {
        if conversation.is_empty() {
            return Ok(None);
        }

        let path = self.unique_path(&Self::stem_for(conversation));
        let contents = serde_json::to_string_pretty(conversation.to_ordered_list())?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &path)?;

        tracing::info!("Saved conversation to {}", path.display());
        Ok(Some(path))
    }

    pub fn load(&self, filename: &str) -> Result<Conversation> {
        let path = self.resolve(filename)?;
        let contents = fs::read_to_string(&path)?;
        let messages: Vec<Message> = serde_json::from_str(&contents)?;

        tracing::info!("Loaded {} messages from {}", messages.len(), path.display());
        Ok(Conversation::from_messages(messages))
    }

    pub fn delete(&self, filename: &str) -> Result<()> {
        let path = self.resolve(filename)?;
        fs::remove_file(&path)?;
        tracing::info!("Deleted {}", path.display());
        Ok(())
    }

    /// Saved file names, in whatever order the directory listing yields.
    pub fn list_saved(&self) -> Result<Vec<String>> {
        let suffix = format!(".{}", defaults::HISTORY_EXTENSION);
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(&suffix) && entry.path().is_file() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn test_sanitize_strips_punctuation_and_spaces() {
        assert_eq!(sanitize_filename("Hello, world!"), "Hello_world");
        assert_eq!(sanitize_filename("what's up?"), "whats_up");
    }

    #[test]
    fn test_sanitize_keeps_hyphen_and_underscore() {
        assert_eq!(sanitize_filename("a-b_c"), "a-b_c");
    }

    #[test]
    fn test_sanitize_drops_newlines_and_tabs() {
        assert_eq!(sanitize_filename("line one\nline\ttwo\r"), "line_onelinetwo");
    }

    #[test]
    fn test_sanitize_truncates_to_twenty() {
        let s = sanitize_filename("this is a rather long opening message");
        assert_eq!(s.chars().count(), 20);
        assert_eq!(s, "this_is_a_rather_lon");
    }

    #[test]
    fn test_sanitize_counts_characters_not_bytes() {
        let s = sanitize_filename(&"é".repeat(30));
        assert_eq!(s.chars().count(), 20);
    }

    #[test]
    fn test_sanitize_only_punctuation_is_empty() {
        assert_eq!(sanitize_filename("?!.,;:"), "");
    }

    #[test]
    fn test_stem_falls_back_without_user_message() {
        let mut conv = Conversation::new();
        conv.append(Role::System, "sys");
        assert_eq!(ConversationStore::stem_for(&conv), "conversation");

        conv.append(Role::User, "???");
        assert_eq!(ConversationStore::stem_for(&conv), "conversation");
    }

    #[test]
    fn test_resolve_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConversationStore::open(dir.path()).unwrap();
        assert!(store.resolve("../escape.json").is_err());
        assert!(store.resolve("nested/file.json").is_err());
        assert!(store.resolve("plain.json").is_ok());
    }
}
