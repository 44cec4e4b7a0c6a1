//! OpenAI chat completions provider.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::{LLMError, error_from_response};
use super::provider::LLMProvider;
use super::types::{ChatRequest, ChatResponse};

/// Provider for the OpenAI chat completions API.
pub struct OpenAICompatibleProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAICompatibleProvider {
    #[must_use]
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %request.model, messages = request.messages.len(), "OpenAI request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let completion: Response = response.json().await?;
        from_response(completion)
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(serde::Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(serde::Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn from_response(response: Response) -> Result<ChatResponse, LLMError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::InvalidResponse("response contained no choices".to_string()))?;

    Ok(ChatResponse {
        content: choice.message.content.unwrap_or_default(),
    })
}
