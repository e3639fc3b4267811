//! Config loading, validation, and override operations.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE;
use crate::agent::prompt::{PROMPT_VARIABLES, TASK_VARIABLES, check_template};
use crate::error::{QuillError, Result};
use std::path::{Path, PathBuf};

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub topic: Option<String>,
    pub model: Option<String>,
    pub output_path: Option<PathBuf>,
}

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            QuillError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a command.
    ///
    /// An explicit path must exist. Without one, `quill.yaml` in the working
    /// directory is used if present, and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    log::debug!("[CONFIG] no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| QuillError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(topic) = overrides.topic {
            self.topic = topic;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(output_path) = overrides.output_path {
            self.output_path = output_path;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `model`, `api_key_env` and `base_url` must be non-empty
    /// - `preview_chars` must be positive
    /// - persona override fields, when set, must be non-empty
    /// - `prompt_template` may only use the agent prompt variables
    /// - task overrides may only use `{topic}`
    ///
    /// Empty task overrides are accepted here; the pipeline rejects them
    /// before the first model call.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("model", &self.model),
            ("api_key_env", &self.api_key_env),
            ("base_url", &self.base_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(QuillError::ConfigError(format!(
                    "config validation failed: {} must not be empty",
                    name
                )));
            }
        }

        if self.preview_chars == 0 {
            return Err(QuillError::ConfigError(
                "config validation failed: preview_chars must be greater than 0".to_string(),
            ));
        }

        for (stage, persona) in &self.agents {
            for (field, value) in persona.set_fields() {
                if value.trim().is_empty() {
                    return Err(QuillError::ConfigError(format!(
                        "config validation failed: agents.{}.{} must not be empty",
                        stage, field
                    )));
                }
            }
        }

        if let Some(template) = &self.prompt_template {
            check_template(template, PROMPT_VARIABLES).map_err(|e| {
                QuillError::ConfigError(format!(
                    "config validation failed: prompt_template: {}\n\
                     Available variables: {}",
                    e,
                    PROMPT_VARIABLES.join(", ")
                ))
            })?;
        }

        for (stage, description) in &self.tasks {
            check_template(description, TASK_VARIABLES).map_err(|e| {
                QuillError::ConfigError(format!(
                    "config validation failed: tasks.{}: {}\n\
                     Fix: use {{topic}} for the topic and {{{{ }}}} for literal braces.",
                    stage, e
                ))
            })?;
        }

        Ok(())
    }
}
