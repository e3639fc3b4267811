//! Hooks for reporting pipeline progress.

use super::runner::StageRecord;
use super::stage::{PipelineState, Stage};
use crate::agent::Agent;
use crate::error::QuillError;
use std::path::Path;

/// Receives progress callbacks from [`super::Pipeline::run`].
///
/// All methods default to doing nothing.
pub trait PipelineObserver {
    /// Called on every state transition, including `Start` and `Failed`.
    fn state_changed(&mut self, _state: PipelineState) {}

    /// Called before a stage's agent is invoked.
    fn stage_started(&mut self, _stage: Stage, _agent: &Agent) {}

    /// Called after a stage's agent returns, successfully or not.
    fn stage_completed(&mut self, _record: &StageRecord) {}

    /// Called once the artifact has been written.
    fn persisted(&mut self, _path: &Path) {}

    /// Called when the run aborts.
    fn failed(&mut self, _error: &QuillError) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
