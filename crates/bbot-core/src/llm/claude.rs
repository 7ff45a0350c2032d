use crate::constants::{defaults, endpoints};
use crate::error::ProviderError;
use crate::llm::traits::*;
use serde::{Deserialize, Serialize};

/// Anthropic messages client.
///
/// Only the latest user message is sent, without the system prompt or
/// earlier turns, and output is capped at `max_tokens`.
pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: crate::constants::models::CLAUDE_35_SONNET.to_string(),
            base_url: endpoints::ANTHROPIC_BASE_URL.to_string(),
            max_tokens: defaults::ANTHROPIC_MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a preconfigured HTTP client (proxy settings, timeouts).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    fn build_request<'a>(&'a self, latest_user_message: &'a str) -> ClaudeRequest<'a> {
        ClaudeRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ClaudeMessageIn {
                role: Role::User.as_str(),
                content: latest_user_message,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ClaudeMessageIn<'a>>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessageIn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiResponse {
    #[serde(default)]
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(default)]
    text: String,
}

/// First content block's text, or the placeholder when there are none.
pub(crate) fn parse_reply(body: &str) -> Result<String, ProviderError> {
    let response: ClaudeApiResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::new(format!("Failed to parse response: {e}")))?;

    Ok(response
        .content
        .into_iter()
        .next()
        .map(|c| c.text)
        .unwrap_or_else(|| defaults::EMPTY_REPLY_PLACEHOLDER.to_string()))
}

#[async_trait::async_trait]
impl LlmClient for ClaudeClient {
    async fn generate_reply(
        &self,
        _history: &[Message],
        latest_user_message: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/v1/messages", self.base_url);
        let request_body = self.build_request(latest_user_message);

        tracing::debug!(model = %self.model, max_tokens = self.max_tokens, "sending Anthropic request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", endpoints::ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::new(format!(
                "Anthropic API error ({}): {}",
                status, response_text
            )));
        }

        parse_reply(&response_text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
