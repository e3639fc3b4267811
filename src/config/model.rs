//! Config struct definition and default implementation.

use super::types::*;
use crate::pipeline::Stage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration for a quill run.
///
/// This struct represents the contents of `quill.yaml`. Every field has a
/// default, so an empty or missing file is a valid configuration. Unknown
/// fields are preserved for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Model settings
    // =========================================================================
    /// Model identifier used by every agent without a per-stage override.
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the text-generation API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    // =========================================================================
    // Content settings
    // =========================================================================
    /// Topic substituted into `{topic}` in task descriptions.
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Replacement agent prompt template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,

    /// Per-stage persona overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub agents: BTreeMap<Stage, PersonaOverride>,

    /// Per-stage task description overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tasks: BTreeMap<Stage, String>,

    // =========================================================================
    // Output settings
    // =========================================================================
    /// Artifact written at the end of a successful run.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Append-only NDJSON run log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Number of characters shown in console previews of stage results.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            topic: default_topic(),
            prompt_template: None,
            agents: BTreeMap::new(),
            tasks: BTreeMap::new(),
            output_path: default_output_path(),
            log_path: default_log_path(),
            preview_chars: default_preview_chars(),
            extra: BTreeMap::new(),
        }
    }
}
