//! Provider registry for building per-request LLM clients.

use std::sync::Arc;

use reqwest::Client;
use tracing::debug;

use super::anthropic::AnthropicProvider;
use super::gemini::GeminiProvider;
use super::openai::OpenAICompatibleProvider;
use super::provider::{LLMProvider, Provider};
use crate::config::UpstreamsConfig;

/// Builds provider clients on demand.
///
/// Credentials arrive with each request, so no client is kept between calls.
/// Only the pooled HTTP client and the upstream endpoints are shared.
#[derive(Clone)]
pub struct ProviderRegistry {
    client: Client,
    upstreams: Arc<UpstreamsConfig>,
}

impl ProviderRegistry {
    pub fn new(client: Client, upstreams: UpstreamsConfig) -> Self {
        Self {
            client,
            upstreams: Arc::new(upstreams),
        }
    }

    /// Build a client for `provider` authenticated with `api_key`.
    pub fn connect(&self, provider: Provider, api_key: &str) -> Arc<dyn LLMProvider> {
        let client = self.client.clone();
        let api_key = api_key.to_string();
        debug!(%provider, "Connecting provider");

        match provider {
            Provider::OpenAI => Arc::new(OpenAICompatibleProvider::new(
                client,
                self.upstreams.openai.base_url.clone(),
                api_key,
            )),
            Provider::Anthropic => Arc::new(
                AnthropicProvider::new(client, api_key, self.upstreams.anthropic.base_url.clone())
                    .with_api_version(self.upstreams.anthropic.api_version.clone()),
            ),
            Provider::Google => Arc::new(GeminiProvider::new(
                client,
                api_key,
                self.upstreams.google.base_url.clone(),
                provider.model().to_string(),
            )),
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(Client::new(), UpstreamsConfig::default())
    }
}
