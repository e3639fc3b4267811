//! Error types for the quill CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Upstream model failures have their own type in [`crate::model::ModelError`];
//! they are folded into text at the agent boundary and never surface here.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for quill operations.
#[derive(Error, Debug)]
pub enum QuillError {
    /// User provided invalid arguments or an unreadable input.
    #[error("{0}")]
    UserError(String),

    /// Missing credential, malformed config file or invalid prompt template.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A task description failed validation before any model call.
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// The output artifact or run log could not be written.
    #[error("Output failed: {0}")]
    OutputError(String),
}

impl QuillError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuillError::UserError(_) => exit_codes::USER_ERROR,
            QuillError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            QuillError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            QuillError::OutputError(_) => exit_codes::OUTPUT_FAILURE,
        }
    }
}

/// Result type alias for quill operations.
pub type Result<T> = std::result::Result<T, QuillError>;
