//! LLM error types.

use thiserror::Error;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Request could not be shaped for the upstream API
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API answered 2xx but the payload had no usable reply
    #[error("malformed response: {0}")]
    InvalidResponse(String),
}

/// Convert a non-2xx response into [`LLMError::Api`].
///
/// All three upstreams wrap failures as `{"error": {"message": "..."}}`; that
/// message is preferred over the raw body.
pub(crate) async fn error_from_response(response: reqwest::Response) -> LLMError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    LLMError::Api {
        status: status.as_u16(),
        message: extract_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string()),
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let from_json = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .or_else(|| value.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    Some(from_json.unwrap_or_else(|| trimmed.to_string()))
}
