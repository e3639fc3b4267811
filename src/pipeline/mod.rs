//! The research → writing → editing pipeline.
//!
//! - **Stage**: the fixed stage order and the run state machine
//! - **Runner**: executes the stages, threading each result into the next
//! - **Artifact**: renders the persisted output file
//! - **Observer**: progress callbacks for the CLI and tests

mod artifact;
mod observer;
mod runner;
mod stage;

pub use artifact::render_artifact;
pub use observer::{NoopObserver, PipelineObserver};
pub use runner::{Pipeline, PipelineRun, StageRecord, validate_task_description};
pub use stage::{PipelineState, Stage};
