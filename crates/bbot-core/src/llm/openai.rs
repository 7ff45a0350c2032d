use crate::constants::endpoints;
use crate::error::ProviderError;
use crate::llm::traits::*;
use serde::{Deserialize, Serialize};

/// Chat completions client. Sends the full conversation on every request.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: crate::constants::models::O1_MINI.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
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

    fn build_request<'a>(&'a self, history: &'a [Message]) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: &self.model,
            messages: history
                .iter()
                .map(|m| OpenAIMessageIn {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessageIn<'a>>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessageIn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessageOut,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessageOut {
    content: Option<String>,
}

/// Extract the first candidate's content from a chat completions body.
pub(crate) fn parse_reply(body: &str) -> Result<String, ProviderError> {
    let response: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::new(format!("Failed to parse response: {e}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::new("No choices in OpenAI response"))?;

    choice
        .message
        .content
        .ok_or_else(|| ProviderError::new("OpenAI response has no message content"))
}

#[async_trait::async_trait]
impl LlmClient for OpenAIClient {
    async fn generate_reply(
        &self,
        history: &[Message],
        _latest_user_message: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request_body = self.build_request(history);

        tracing::debug!(model = %self.model, messages = history.len(), "sending OpenAI request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::new(format!(
                "OpenAI API error ({}): {}",
                status, response_text
            )));
        }

        parse_reply(&response_text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
