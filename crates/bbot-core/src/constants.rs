//! Model names, endpoints and defaults.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const O1_MINI: &str = "o1-mini";
    pub const GPT_4O_MINI: &str = "gpt-4o-mini";
    pub const CLAUDE_35_SONNET: &str = "claude-3-5-sonnet-20240620";
    pub const CLAUDE_3_HAIKU: &str = "claude-3-haiku-20240307";

    /// Ordered catalogs; the first entry is what a provider switch selects.
    pub const OPENAI_MODELS: &[&str] = &[O1_MINI, GPT_4O_MINI];
    pub const ANTHROPIC_MODELS: &[&str] = &[CLAUDE_35_SONNET, CLAUDE_3_HAIKU];
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const SYSTEM_PROMPT: &str = "You are a friendly chatbot called BBot.";
    pub const HISTORY_DIR: &str = "history";
    pub const HISTORY_EXTENSION: &str = "json";
    /// Used when the first user message sanitizes to nothing.
    pub const FALLBACK_STEM: &str = "conversation";
    pub const MAX_FILENAME_CHARS: usize = 20;
    /// Output cap for the Anthropic adapter.
    pub const ANTHROPIC_MAX_TOKENS: u32 = 100;
    pub const EMPTY_REPLY_PLACEHOLDER: &str = "No response from AI.";
}
