//! Anthropic LLM provider with native API format.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::error::{LLMError, error_from_response};
use super::provider::{LLMProvider, MAX_OUTPUT_TOKENS};
use super::types::{ChatRequest, ChatResponse, Message};

/// Anthropic provider with native API format.
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    api_key: String,
    api_version: String,
}

impl AnthropicProvider {
    pub const DEFAULT_API_VERSION: &'static str = "2023-06-01";

    #[must_use]
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            api_version: Self::DEFAULT_API_VERSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let url = format!("{}/v1/messages", self.base_url);
        let anthropic_request = to_request(&request);
        debug!(
            model = %anthropic_request.model,
            messages = anthropic_request.messages.len(),
            "Anthropic request"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&anthropic_request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let anthropic_response: Response = response.json().await?;
        from_response(anthropic_response)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(serde::Deserialize)]
struct Response {
    content: Vec<Content>,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Content {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

// ============================================================================
// Conversions
// ============================================================================

fn to_request(request: &ChatRequest) -> Request<'_> {
    Request {
        model: &request.model,
        max_tokens: request.max_tokens.unwrap_or(MAX_OUTPUT_TOKENS),
        messages: &request.messages,
        temperature: request.temperature,
    }
}

/// Only the first content block is considered. A non-text first block yields
/// empty reply text rather than an error.
fn from_response(response: Response) -> Result<ChatResponse, LLMError> {
    let first = response.content.into_iter().next().ok_or_else(|| {
        LLMError::InvalidResponse("response contained no content blocks".to_string())
    })?;

    let content = match first {
        Content::Text { text } => text,
        Content::Other => {
            warn!("First Anthropic content block is not text, replying with empty text");
            String::new()
        }
    };

    Ok(ChatResponse { content })
}
