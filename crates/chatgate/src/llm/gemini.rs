//! Google Gemini provider.
//!
//! Gemini's chat sessions are client-side: a session is seeded with prior
//! turns and every `sendMessage` replays them to `generateContent`. This
//! provider does the same in a single stateless call, so no session outlives
//! the request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{LLMError, error_from_response};
use super::provider::{LLMProvider, MAX_OUTPUT_TOKENS};
use super::types::{ChatRequest, ChatResponse, Message, Role};

/// Provider for the Gemini `generateContent` API.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiProvider {
    #[must_use]
    pub fn new(client: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    /// Send `turn` as the live user message after replaying `history`.
    pub async fn send_turn(&self, history: &[Message], turn: &str) -> Result<String, LLMError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = to_request(history, turn, self.max_output_tokens);
        debug!(
            model = %self.model,
            history = history.len(),
            "Gemini request"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let api_response: ApiResponse = response.json().await?;
        from_response(api_response)
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    /// The model is fixed at construction; `request.model` is not consulted.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        let (turn, history) = split_turn(&request.messages).ok_or_else(|| {
            LLMError::InvalidRequest("cannot send an empty conversation".to_string())
        })?;

        let content = self.send_turn(history, &turn.content).await?;
        Ok(ChatResponse { content })
    }
}

/// Split a conversation into its last message and everything before it.
pub fn split_turn(messages: &[Message]) -> Option<(&Message, &[Message])> {
    messages.split_last()
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

/// Finish reasons that mean the candidate text was withheld.
const BLOCKED_FINISH_REASONS: [&str; 5] = [
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

fn text_content(role: &str, text: &str) -> Content {
    Content {
        role: role.to_string(),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

fn to_request(history: &[Message], turn: &str, max_output_tokens: u32) -> Request {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                _ => "model",
            };
            text_content(role, &m.content)
        })
        .collect();
    contents.push(text_content("user", turn));

    Request {
        contents,
        generation_config: GenerationConfig { max_output_tokens },
    }
}

fn from_response(response: ApiResponse) -> Result<String, LLMError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt was blocked: {r}"))
            .unwrap_or_else(|| "response contained no candidates".to_string());
        return Err(LLMError::InvalidResponse(reason));
    };

    if let Some(reason) = candidate
        .finish_reason
        .as_deref()
        .filter(|r| BLOCKED_FINISH_REASONS.contains(r))
    {
        return Err(LLMError::InvalidResponse(format!(
            "response was blocked: {reason}"
        )));
    }

    Ok(candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default())
}
