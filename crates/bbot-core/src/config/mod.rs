use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{defaults, endpoints, models};
use crate::error::{BbotError, Result};
use crate::llm::ProviderId;

/// User-editable settings, loaded from `config.toml` and overridden by
/// command-line flags before the session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: ProviderId,
    pub model: String,
    /// Environment variable holding the API key. Empty means the
    /// provider's conventional variable.
    pub api_key_env: String,
    pub history_dir: PathBuf,
    pub system_prompt: String,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderId::OpenAI,
            model: models::O1_MINI.to_string(),
            api_key_env: String::new(),
            history_dir: PathBuf::from(defaults::HISTORY_DIR),
            system_prompt: defaults::SYSTEM_PROMPT.to_string(),
            openai_base_url: endpoints::OPENAI_BASE_URL.to_string(),
            anthropic_base_url: endpoints::ANTHROPIC_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bbot")
            .join("config.toml")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or does not parse.
    pub fn load_from(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring malformed {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("Could not read {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| BbotError::config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn api_key_env(&self) -> &str {
        if self.api_key_env.is_empty() {
            self.provider.default_api_key_env()
        } else {
            &self.api_key_env
        }
    }

    /// Get the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(self.api_key_env())
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn base_url(&self) -> &str {
        match self.provider {
            ProviderId::OpenAI => &self.openai_base_url,
            ProviderId::Anthropic => &self.anthropic_base_url,
        }
    }

    /// Freeze these settings into the configuration a session runs with.
    pub fn into_config(self, api_key: impl Into<String>) -> Result<ChatConfig> {
        if !self.provider.supports_model(&self.model) {
            return Err(BbotError::config(format!(
                "Model '{}' is not available for {} (choose one of: {})",
                self.model,
                self.provider,
                self.provider.known_models().join(", ")
            )));
        }

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BbotError::config(format!(
                "No API key for {}",
                self.provider
            )));
        }

        let base_url = self.base_url().to_string();
        Ok(ChatConfig {
            provider: self.provider,
            model: self.model,
            api_key: api_key.trim().to_string(),
            base_url,
            system_prompt: self.system_prompt,
            history_dir: self.history_dir,
        })
    }
}

/// Immutable session configuration, built once at startup and passed by
/// reference to the provider factory and the session.
#[derive(Clone)]
pub struct ChatConfig {
    provider: ProviderId,
    model: String,
    api_key: String,
    base_url: String,
    system_prompt: String,
    history_dir: PathBuf,
}

impl ChatConfig {
    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn history_dir(&self) -> &std::path::Path {
        &self.history_dir
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("history_dir", &self.history_dir)
            .finish()
    }
}
