//! Text-generation backends.
//!
//! The pipeline depends only on [`TextGenerator`]: one blocking call that
//! turns a prompt into text for a named model. [`GeminiClient`] is the
//! production implementation.

mod gemini;

pub use gemini::{DEFAULT_BASE_URL, GeminiClient};

use thiserror::Error;

/// Default hosted model identifier used by every agent unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Errors surfaced by a text-generation call.
///
/// The `Display` text of these errors is what ends up embedded in the
/// pipeline output when a stage fails, so keep messages short and readable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The request never produced an HTTP response (DNS, connect, TLS, reset).
    #[error("request failed: {0}")]
    Request(String),

    /// The service rejected the call because of quota or rate limits.
    #[error("quota exceeded ({status}): {message}")]
    QuotaExceeded { status: u16, message: String },

    /// Any other non-success HTTP status (bad key, bad model, server error).
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The response decoded but carried no text.
    #[error("empty response: {0}")]
    EmptyResponse(String),
}

/// A synchronous text-generation service.
///
/// Implementations block the calling thread until the service answers or
/// fails. No timeout or retry is applied at this layer.
pub trait TextGenerator {
    /// Generate text for `prompt` using the model named `model`.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        (**self).generate(model, prompt)
    }
}
