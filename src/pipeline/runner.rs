//! Sequential execution of the research, writing and editing stages.

use super::artifact::render_artifact;
use super::observer::PipelineObserver;
use super::stage::{PipelineState, Stage};
use crate::agent::{Crew, TaskOutcome};
use crate::error::{QuillError, Result};
use crate::fs::atomic_write_file;
use crate::model::TextGenerator;
use crate::tasks::TaskRegistry;
use std::path::{Path, PathBuf};

/// What one stage received and produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub stage: Stage,
    /// Role of the agent that ran the stage.
    pub role: String,
    /// Context passed in: empty for research, otherwise the previous text.
    pub context: String,
    pub outcome: TaskOutcome,
}

impl StageRecord {
    /// The stage's result as downstream stages and the artifact see it.
    pub fn text(&self) -> String {
        self.outcome.to_text()
    }
}

/// The result of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// One record per stage, in [`Stage::ORDER`].
    pub records: Vec<StageRecord>,
    /// Exact text written to `output_path`.
    pub artifact: String,
    pub output_path: PathBuf,
}

impl PipelineRun {
    pub fn record(&self, stage: Stage) -> Option<&StageRecord> {
        self.records.iter().find(|r| r.stage == stage)
    }

    /// The editing stage's text.
    pub fn final_text(&self) -> String {
        self.record(Stage::Editing)
            .map(StageRecord::text)
            .unwrap_or_default()
    }

    /// Whether any stage produced an error string instead of content.
    ///
    /// A degraded run still completes: the error string is threaded into the
    /// next stage as context and written to the artifact.
    pub fn is_degraded(&self) -> bool {
        self.records.iter().any(|r| r.outcome.is_failure())
    }
}

/// The fixed three-stage pipeline.
pub struct Pipeline<'a> {
    crew: &'a Crew,
    tasks: &'a TaskRegistry,
    generator: &'a dyn TextGenerator,
}

impl<'a> Pipeline<'a> {
    pub fn new(crew: &'a Crew, tasks: &'a TaskRegistry, generator: &'a dyn TextGenerator) -> Self {
        Self {
            crew,
            tasks,
            generator,
        }
    }

    /// Check every stage's task description before anything is sent.
    pub fn validate(&self) -> Result<()> {
        for stage in Stage::ORDER {
            validate_task_description(stage, self.tasks.get(stage))?;
        }
        Ok(())
    }

    /// Run all stages in order and write the artifact to `output_path`.
    ///
    /// Validation failures abort before the first model call. Model failures
    /// do not abort: the failed stage's error text becomes the next stage's
    /// context. Nothing is written unless all three stages ran.
    pub fn run(
        &self,
        output_path: &Path,
        observer: &mut dyn PipelineObserver,
    ) -> Result<PipelineRun> {
        let mut state = PipelineState::Start;
        observer.state_changed(state);

        if let Err(e) = self.validate() {
            return Err(fail(observer, e));
        }

        let mut records = Vec::with_capacity(Stage::ORDER.len());
        let mut context = String::new();

        for stage in Stage::ORDER {
            state = state.next();
            observer.state_changed(state);

            let agent = self.crew.agent(stage);
            log::info!("[PIPELINE] step {}: {} ({})", stage.step_number(), stage, agent);
            observer.stage_started(stage, agent);

            let outcome = agent.try_execute_task(self.generator, self.tasks.get(stage), &context);
            if let TaskOutcome::Failed(message) = &outcome {
                // Not fatal: the error text is the next stage's context.
                log::warn!(
                    "[PIPELINE] {} stage failed, continuing with error text as context: {}",
                    stage,
                    message
                );
            }

            let record = StageRecord {
                stage,
                role: agent.role().to_string(),
                context: std::mem::replace(&mut context, outcome.to_text()),
                outcome,
            };
            observer.stage_completed(&record);
            records.push(record);
        }

        let artifact = render_artifact(&records[0].text(), &records[1].text(), &records[2].text());
        if let Err(e) = atomic_write_file(output_path, &artifact) {
            return Err(fail(observer, e));
        }

        state = state.next();
        observer.state_changed(state);
        observer.persisted(output_path);

        state = state.next();
        observer.state_changed(state);

        Ok(PipelineRun {
            records,
            artifact,
            output_path: output_path.to_path_buf(),
        })
    }
}

fn fail(observer: &mut dyn PipelineObserver, error: QuillError) -> QuillError {
    observer.state_changed(PipelineState::Failed);
    observer.failed(&error);
    error
}

/// A task description must contain something other than whitespace.
pub fn validate_task_description(stage: Stage, description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(QuillError::ValidationError(format!(
            "{} task description is empty\n\
             Fix: set a non-empty tasks.{} in the config, or remove it to use the built-in brief.",
            stage, stage
        )));
    }
    Ok(())
}
