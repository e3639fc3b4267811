//! Configuration model for quill.
//!
//! This module defines the Config struct that represents `quill.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are kept),
//! defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::ConfigOverrides;
pub use types::{DEFAULT_CONFIG_FILE, PersonaOverride};
