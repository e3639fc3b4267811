//! Append-only operational log.
//!
//! Every run appends events to an NDJSON file (one JSON object per line):
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (`run_started`, `stage_started`, ...)
//! - `actor`: who ran it (`user@HOST`)
//! - `stage`: optional pipeline stage
//! - `details`: freeform object with action-specific detail
//!
//! The log is diagnostic. Nothing reads it back, and a failed append is
//! reported but never stops a run.

use crate::error::{QuillError, Result};
use crate::pipeline::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions recorded in the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAction {
    RunStarted,
    StageStarted,
    StageCompleted,
    /// A stage returned an error string in place of content.
    StageDegraded,
    RunCompleted,
    RunFailed,
}

/// One line of the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub ts: DateTime<Utc>,
    pub action: RunAction,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    pub details: Value,
}

impl RunEvent {
    pub fn new(action: RunAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            stage: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| QuillError::OutputError(format!("failed to serialize run event: {}", e)))
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Handle to the run log file.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event, creating the file and its directory if needed.
    pub fn append(&self, event: &RunEvent) -> Result<()> {
        let line = event.to_ndjson_line()?;

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).map_err(|e| {
                QuillError::OutputError(format!(
                    "failed to create run log directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                QuillError::OutputError(format!(
                    "failed to open run log '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        writeln!(file, "{}", line).map_err(|e| {
            QuillError::OutputError(format!(
                "failed to write run log '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Append an event, downgrading failure to a warning.
    pub fn record(&self, event: RunEvent) {
        if let Err(e) = self.append(&event) {
            log::warn!("[RUNLOG] {}", e);
        }
    }
}
