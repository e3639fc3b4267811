//! Run environment resolution.
//!
//! Resolves what a run needs from the process environment before any agent
//! is built: the API credential named by `api_key_env`. `.env` loading
//! happens once in `main`, so values from the file and from the shell are
//! both visible here.

use crate::config::Config;
use crate::error::{QuillError, Result};
use std::fmt;

/// Everything a run needs from outside the config file.
#[derive(Clone)]
pub struct RunContext {
    /// Name of the variable the key came from.
    pub api_key_env: String,
    pub api_key: String,
}

impl RunContext {
    /// Resolve the context using `lookup` to read variables.
    ///
    /// `quill run` passes [`env_var`]; tests pass a fixed map.
    ///
    /// A missing or blank credential is a configuration error.
    pub fn resolve_with<F>(config: &Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = config.api_key_env.as_str();
        let api_key = lookup(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                QuillError::ConfigError(format!(
                    "{name} not found in environment variables\n\
                     Fix: set your API key in a .env file, e.g. {name}=your_api_key_here"
                ))
            })?;

        Ok(Self {
            api_key_env: name.to_string(),
            api_key: api_key.trim().to_string(),
        })
    }
}

/// Read a variable from the process environment.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
