use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Config (root)
// ============================================================================

/// Process configuration. Holds no credentials; those arrive per request.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstreams: UpstreamsConfig,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }
}

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

// ============================================================================
// UpstreamsConfig
// ============================================================================

/// Endpoints of the upstream completion APIs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamsConfig {
    #[serde(default)]
    pub openai: OpenAIUpstream,
    #[serde(default)]
    pub anthropic: AnthropicUpstream,
    #[serde(default)]
    pub google: GoogleUpstream,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIUpstream {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl Default for OpenAIUpstream {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicUpstream {
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,
    #[serde(default = "default_anthropic_api_version")]
    pub api_version: String,
}

impl Default for AnthropicUpstream {
    fn default() -> Self {
        Self {
            base_url: default_anthropic_base_url(),
            api_version: default_anthropic_api_version(),
        }
    }
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_api_version() -> String {
    "2023-06-01".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUpstream {
    #[serde(default = "default_google_base_url")]
    pub base_url: String,
}

impl Default for GoogleUpstream {
    fn default() -> Self {
        Self {
            base_url: default_google_base_url(),
        }
    }
}

fn default_google_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

// ============================================================================
// Tests
// ============================================================================
