//! Configuration types and defaults for quill.

use crate::model::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "quill.yaml";

/// Per-stage persona override.
///
/// Unset fields keep the built-in persona's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backstory: Option<String>,

    /// Model identifier for this stage only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PersonaOverride {
    /// Iterate over the set fields as `(name, value)` pairs.
    pub fn set_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("role", self.role.as_deref()),
            ("goal", self.goal.as_deref()),
            ("backstory", self.backstory.as_deref()),
            ("model", self.model.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

pub(crate) fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

pub(crate) fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

pub(crate) fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn default_topic() -> String {
    "The Future of Artificial Intelligence in Healthcare".to_string()
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("output.txt")
}

pub(crate) fn default_log_path() -> PathBuf {
    PathBuf::from("quill-run.ndjson")
}

pub(crate) fn default_preview_chars() -> usize {
    200
}
