//! Dispatch error types.

use thiserror::Error;

use crate::llm::{LLMError, Provider};

/// Errors produced while dispatching a chat request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The provider selector is not one of the known identifiers.
    #[error("unsupported model")]
    UnsupportedProvider(String),

    /// No usable credential for the selected provider.
    #[error("{} API key not configured", .0.vendor())]
    MissingCredential(Provider),

    /// The message history is empty.
    #[error("conversation has no messages")]
    EmptyConversation,

    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] LLMError),
}

impl DispatchError {
    /// Whether the caller is at fault (as opposed to the upstream).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DispatchError::Upstream(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            DispatchError::UnsupportedProvider("unknown-model".to_string()).to_string(),
            "unsupported model"
        );
        assert_eq!(
            DispatchError::MissingCredential(Provider::OpenAI).to_string(),
            "OpenAI API key not configured"
        );
        assert_eq!(
            DispatchError::MissingCredential(Provider::Anthropic).to_string(),
            "Anthropic API key not configured"
        );
        assert_eq!(
            DispatchError::MissingCredential(Provider::Google).to_string(),
            "Google API key not configured"
        );
        assert_eq!(
            DispatchError::Upstream(LLMError::InvalidResponse("no choices".to_string()))
                .to_string(),
            "malformed response: no choices"
        );
    }

    #[test]
    fn classification() {
        assert!(DispatchError::UnsupportedProvider(String::new()).is_client_error());
        assert!(DispatchError::MissingCredential(Provider::Anthropic).is_client_error());
        assert!(DispatchError::EmptyConversation.is_client_error());
        assert!(
            !DispatchError::Upstream(LLMError::Api {
                status: 401,
                message: "bad key".to_string()
            })
            .is_client_error()
        );
    }
}
