//! Blocking client for the Gemini `generateContent` endpoint.

use super::{ModelError, TextGenerator};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key. Kept out of the URL so transport errors,
/// which echo the URL, never leak the key into pipeline output.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini text-generation client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client for the public Gemini endpoint.
    ///
    /// The underlying HTTP client has no request timeout: a call blocks until
    /// the service answers or the connection fails.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ModelError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Point the client at a different base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        log::debug!(
            "[GEMINI] generateContent model={} prompt_len={}",
            model,
            prompt.len()
        );

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                let message = error_chain(&e.without_url());
                log::error!("[GEMINI] request failed: {}", message);
                ModelError::Request(message)
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ModelError::Decode(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            log::error!("[GEMINI] status {}: {}", status, text);
            return Err(status_error(status, &text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!("[GEMINI] undecodable response: {}", e);
            ModelError::Decode(e.to_string())
        })?;

        extract_text(parsed)
    }
}

/// Render an error with its `source()` causes, `": "`-separated.
///
/// reqwest's own message is only "error sending request"; the reason
/// (refused connection, DNS failure, TLS) lives further down the chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Map a non-success status to an error, preferring the API's own message.
fn status_error(status: StatusCode, body: &str) -> ModelError {
    let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    let code = status.as_u16();
    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::PAYMENT_REQUIRED {
        ModelError::QuotaExceeded {
            status: code,
            message,
        }
    } else {
        ModelError::Status {
            status: code,
            message,
        }
    }
}

/// Join the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String, ModelError> {
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked ({})", r))
            .unwrap_or_else(|| "no candidates in response".to_string());
        ModelError::EmptyResponse(reason)
    })?;

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let text: String = parts.into_iter().filter_map(|p| p.text).collect();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .map(|r| format!("no text in candidate (finish reason {})", r))
            .unwrap_or_else(|| "no text in candidate".to_string());
        return Err(ModelError::EmptyResponse(reason));
    }

    Ok(text)
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}
