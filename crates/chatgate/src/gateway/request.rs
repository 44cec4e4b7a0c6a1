//! Inbound request and normalized reply shapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::llm::{Message, Provider};

/// Per-provider credentials supplied with every request.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub openai: Option<String>,
    #[serde(default)]
    pub anthropic: Option<String>,
    #[serde(default)]
    pub google: Option<String>,
}

impl Credentials {
    /// Credential for `provider`, or `None` when absent or blank.
    pub fn for_provider(&self, provider: Provider) -> Option<&str> {
        let value = match provider {
            Provider::OpenAI => self.openai.as_deref(),
            Provider::Anthropic => self.anthropic.as_deref(),
            Provider::Google => self.google.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => "<redacted>",
                _ => "<unset>",
            }
        }

        f.debug_struct("Credentials")
            .field("openai", &redact(&self.openai))
            .field("anthropic", &redact(&self.anthropic))
            .field("google", &redact(&self.google))
            .finish()
    }
}

/// One chat turn as sent by the conversation client.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    pub messages: Vec<Message>,
    #[serde(alias = "model")]
    pub provider: String,
    #[serde(default, alias = "apiKeys")]
    pub credentials: Credentials,
}

/// Normalized gateway reply: exactly one of `content` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NormalizedReply {
    Content { content: String },
    Error { error: String },
}

impl NormalizedReply {
    pub fn content(content: impl Into<String>) -> Self {
        NormalizedReply::Content {
            content: content.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        NormalizedReply::Error {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn parse_request() {
        let json = r#"{
            "messages": [{"role": "user", "content": "hi"}],
            "provider": "gpt-4",
            "credentials": {"openai": "sk-1"}
        }"#;
        let request: DispatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.provider, "gpt-4");
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(
            request.credentials.for_provider(Provider::OpenAI),
            Some("sk-1")
        );
        assert_eq!(request.credentials.for_provider(Provider::Google), None);
    }

    #[test]
    fn parse_browser_client_field_names() {
        let json = r#"{
            "messages": [{"role": "user", "content": "hi"}],
            "model": "gemini-pro",
            "apiKeys": {"openai": "", "anthropic": "", "google": "g-1"}
        }"#;
        let request: DispatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.provider, "gemini-pro");
        assert_eq!(
            request.credentials.for_provider(Provider::Google),
            Some("g-1")
        );
        assert_eq!(request.credentials.for_provider(Provider::OpenAI), None);
    }

    #[test]
    fn credentials_default_when_omitted() {
        let json = r#"{"messages": [], "provider": "claude-3-opus"}"#;
        let request: DispatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.credentials.for_provider(Provider::Anthropic), None);
    }

    #[test]
    fn blank_credential_is_absent() {
        let credentials = Credentials {
            anthropic: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(credentials.for_provider(Provider::Anthropic), None);
    }

    #[test]
    fn debug_redacts_secrets() {
        let credentials = Credentials {
            openai: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("<unset>"));
    }

    #[test]
    fn reply_serializes_one_field() {
        assert_eq!(
            serde_json::to_value(NormalizedReply::content("hello")).unwrap(),
            serde_json::json!({"content": "hello"})
        );
        assert_eq!(
            serde_json::to_value(NormalizedReply::error("unsupported model")).unwrap(),
            serde_json::json!({"error": "unsupported model"})
        );
    }
}
