//! LLM provider clients for chat completions.

mod anthropic;
mod error;
mod gemini;
mod openai;
mod provider;
mod registry;
mod types;

pub use anthropic::AnthropicProvider;
pub use error::LLMError;
pub use gemini::{GeminiProvider, split_turn};
pub use openai::OpenAICompatibleProvider;
pub use provider::{
    LLMProvider, MAX_OUTPUT_TOKENS, OPENAI_TEMPERATURE, Provider, UnknownProvider,
};
pub use registry::ProviderRegistry;
pub use types::{ChatRequest, ChatResponse, Message, Role};
