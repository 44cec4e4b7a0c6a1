//! LLM provider trait and the closed set of supported providers.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use super::error::LLMError;
use super::types::{ChatRequest, ChatResponse};

/// Output ceiling applied to every upstream request.
pub const MAX_OUTPUT_TOKENS: u32 = 2000;

/// Sampling temperature sent to OpenAI.
pub const OPENAI_TEMPERATURE: f32 = 0.7;

/// Trait for LLM providers with different API formats.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Make a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError>;
}

/// A selectable upstream provider.
///
/// Each variant maps to exactly one selector identifier and one upstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAI,
    Anthropic,
    Google,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAI, Provider::Anthropic, Provider::Google];

    /// Identifier used by clients to pick this provider.
    pub fn selector(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4",
            Provider::Anthropic => "claude-3-opus",
            Provider::Google => "gemini-pro",
        }
    }

    /// Model name sent upstream.
    pub fn model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4-turbo-preview",
            Provider::Anthropic => "claude-3-opus-20240229",
            Provider::Google => "gemini-pro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "ChatGPT 4",
            Provider::Anthropic => "Claude 3 Opus",
            Provider::Google => "Gemini Pro",
        }
    }

    /// Name of the credential field carrying this provider's key.
    pub fn credential_field(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }

    /// Sampling temperature to request, if this provider is given one.
    pub fn temperature(&self) -> Option<f32> {
        match self {
            Provider::OpenAI => Some(OPENAI_TEMPERATURE),
            Provider::Anthropic | Provider::Google => None,
        }
    }

    /// Vendor name used in user-facing messages.
    pub fn vendor(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Google => "Google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Error returned when a selector names no known provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.selector() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}
