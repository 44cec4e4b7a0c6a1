//! Dispatch gateway: routes one chat turn to the selected provider.
//!
//! The gateway is stateless. Every call validates the selector and
//! credential, makes exactly one upstream call, and normalizes the outcome
//! into a [`NormalizedReply`].

mod error;
mod request;

pub use error::DispatchError;
pub use request::{Credentials, DispatchRequest, NormalizedReply};

use axum::http::StatusCode;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::llm::{ChatRequest, MAX_OUTPUT_TOKENS, Provider, ProviderRegistry, UnknownProvider};

/// Stateless request handler shared by all connections.
#[derive(Clone, Default)]
pub struct Gateway {
    providers: ProviderRegistry,
}

impl Gateway {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self { providers }
    }

    /// Validate `request`, forward it upstream, and return the reply text.
    #[tracing::instrument(
        name = "dispatch",
        skip_all,
        fields(request_id = %Ulid::new(), provider = %request.provider)
    )]
    pub async fn dispatch(&self, request: DispatchRequest) -> Result<String, DispatchError> {
        let provider: Provider = request
            .provider
            .parse()
            .map_err(|UnknownProvider(selector)| DispatchError::UnsupportedProvider(selector))?;

        let api_key = request
            .credentials
            .for_provider(provider)
            .ok_or(DispatchError::MissingCredential(provider))?;

        if request.messages.is_empty() {
            return Err(DispatchError::EmptyConversation);
        }

        let chat_request = ChatRequest {
            model: provider.model().to_string(),
            messages: request.messages,
            temperature: provider.temperature(),
            max_tokens: Some(MAX_OUTPUT_TOKENS),
        };
        info!(
            model = %chat_request.model,
            messages = chat_request.messages.len(),
            "Dispatching chat request"
        );

        let response = self
            .providers
            .connect(provider, api_key)
            .chat(chat_request)
            .await
            .inspect_err(|e| warn!(error = %e, "Upstream request failed"))?;

        debug!(reply_len = response.content.len(), "Upstream replied");
        Ok(response.content)
    }

    /// Dispatch and normalize. Never fails.
    pub async fn handle(&self, request: DispatchRequest) -> (StatusCode, NormalizedReply) {
        match self.dispatch(request).await {
            Ok(content) => (StatusCode::OK, NormalizedReply::content(content)),
            Err(e) if e.is_client_error() => {
                debug!(error = %e, "Rejected chat request");
                (StatusCode::BAD_REQUEST, NormalizedReply::error(e.to_string()))
            }
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                NormalizedReply::error(e.to_string()),
            ),
        }
    }
}
