use crate::config::ChatConfig;
use crate::constants::{endpoints, models};
use crate::error::BbotError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifies a supported LLM provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAI,
    Anthropic,
}

impl ProviderId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => endpoints::OPENAI_BASE_URL,
            Self::Anthropic => endpoints::ANTHROPIC_BASE_URL,
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn all() -> [ProviderId; 2] {
        [Self::OpenAI, Self::Anthropic]
    }

    /// Static, ordered model catalog for this provider.
    pub fn known_models(&self) -> &'static [&'static str] {
        match self {
            Self::OpenAI => models::OPENAI_MODELS,
            Self::Anthropic => models::ANTHROPIC_MODELS,
        }
    }

    pub fn default_model(&self) -> &'static str {
        self.known_models()[0]
    }

    pub fn supports_model(&self, model: &str) -> bool {
        self.known_models().contains(&model)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProviderId {
    type Err = BbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "a" => Ok(Self::OpenAI),
            "anthropic" | "claude" | "b" => Ok(Self::Anthropic),
            other => Err(BbotError::config(format!(
                "Unknown provider '{other}' (expected openai or anthropic)"
            ))),
        }
    }
}

/// The provider/model pair being chosen during setup.
///
/// Switching provider always resets the model to that provider's first
/// catalog entry, so the pair is valid at every point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    provider: ProviderId,
    model: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self::new(ProviderId::OpenAI)
    }
}

impl ModelSelection {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn select_provider(&mut self, provider: ProviderId) {
        self.provider = provider;
        self.model = provider.default_model().to_string();
    }

    pub fn select_model(&mut self, model: &str) -> Result<(), BbotError> {
        if !self.provider.supports_model(model) {
            return Err(BbotError::config(format!(
                "Model '{}' is not available for {} (choose one of: {})",
                model,
                self.provider,
                self.provider.known_models().join(", ")
            )));
        }
        self.model = model.to_string();
        Ok(())
    }

    pub fn available_models(&self) -> &'static [&'static str] {
        self.provider.known_models()
    }
}

/// Build the client variant matching the configured provider.
pub fn build_client(config: &ChatConfig) -> Box<dyn super::LlmClient> {
    match config.provider() {
        ProviderId::OpenAI => Box::new(
            super::OpenAIClient::new(config.api_key())
                .with_model(config.model())
                .with_base_url(config.base_url()),
        ),
        ProviderId::Anthropic => Box::new(
            super::ClaudeClient::new(config.api_key())
                .with_model(config.model())
                .with_base_url(config.base_url()),
        ),
    }
}
