//! Implementation of the `quill run` command.
//!
//! Runs the pipeline end to end:
//! 1. Resolves config and applies command-line overrides
//! 2. Requires the API credential before anything else
//! 3. Builds the crew and task registry
//! 4. Runs research, writing and editing in order
//! 5. Writes the artifact and prints the final article
//!
//! # Logging
//!
//! Appends `run_started`, per-stage events and `run_completed` or
//! `run_failed` to the run log. Failures carry the full error detail.

mod progress;

#[cfg(test)]
mod tests;

use crate::agent::Crew;
use crate::cli::RunArgs;
use crate::config::{Config, ConfigOverrides};
use crate::context::{RunContext, env_var};
use crate::error::{QuillError, Result};
use crate::model::{GeminiClient, TextGenerator};
use crate::pipeline::{Pipeline, PipelineObserver, PipelineRun};
use crate::runlog::{RunAction, RunEvent, RunLog};
use crate::tasks::TaskRegistry;
use serde_json::json;

use progress::ConsoleProgress;

/// Execute the `quill run` command.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let config = Config::resolve(args.config.as_deref())?.with_overrides(ConfigOverrides {
        topic: args.topic,
        model: args.model,
        output_path: args.output,
    })?;

    let run_log = RunLog::new(&config.log_path);
    run_log.record(RunEvent::new(RunAction::RunStarted).with_details(json!({
        "topic": config.topic,
        "model": config.model,
        "output_path": config.output_path.display().to_string(),
    })));

    if !args.quiet {
        println!("Starting quill workflow on \"{}\"...", config.topic);
        println!("{}", "=".repeat(60));
    }

    let mut progress = ConsoleProgress::new(&run_log, config.preview_chars, args.quiet);
    let result = execute(
        &config,
        &mut progress,
        env_var,
        |ctx| connect_gemini(&config, ctx),
    );

    match result {
        Ok(run) => {
            record_completion(&run_log, &run);
            print_summary(&run, args.quiet);
            Ok(())
        }
        Err(err) => {
            record_failure(&run_log, &err);
            if !args.quiet {
                if matches!(err, QuillError::ConfigError(_)) {
                    eprintln!("Please check your API key and configuration.");
                }
                eprintln!("Details logged to '{}'", run_log.path().display());
            }
            Err(err)
        }
    }
}

/// Resolve the credential, build the agents and run the pipeline.
///
/// The credential is checked first so a missing key stops the run before
/// any agent or client is constructed.
pub(crate) fn execute<L, C, G>(
    config: &Config,
    observer: &mut dyn PipelineObserver,
    lookup: L,
    connect: C,
) -> Result<PipelineRun>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(&RunContext) -> Result<G>,
    G: TextGenerator,
{
    let ctx = RunContext::resolve_with(config, lookup)?;
    let crew = Crew::from_config(config)?;
    let tasks = TaskRegistry::from_config(config)?;
    let generator = connect(&ctx)?;

    Pipeline::new(&crew, &tasks, &generator).run(&config.output_path, observer)
}

fn connect_gemini(config: &Config, ctx: &RunContext) -> Result<GeminiClient> {
    log::info!(
        "[RUN] connecting to {} with key from {}",
        config.base_url,
        ctx.api_key_env
    );
    GeminiClient::new(ctx.api_key.as_str())
        .map(|client| client.with_base_url(config.base_url.as_str()))
        .map_err(|e| QuillError::ConfigError(format!("failed to create model client: {}", e)))
}

fn record_completion(run_log: &RunLog, run: &PipelineRun) {
    run_log.record(RunEvent::new(RunAction::RunCompleted).with_details(json!({
        "output_path": run.output_path.display().to_string(),
        "artifact_bytes": run.artifact.len(),
        "degraded": run.is_degraded(),
    })));
}

fn record_failure(run_log: &RunLog, err: &QuillError) {
    run_log.record(RunEvent::new(RunAction::RunFailed).with_details(json!({
        "error": err.to_string(),
        "detail": format!("{:?}", err),
        "exit_code": err.exit_code(),
    })));
}

fn print_summary(run: &PipelineRun, quiet: bool) {
    if run.is_degraded() {
        eprintln!(
            "Warning: one or more stages failed; their error text was passed on as context \
             and saved in the output."
        );
    }

    if quiet {
        println!("{}", run.output_path.display());
        return;
    }

    let rule = "=".repeat(60);
    println!("FINAL ARTICLE:");
    println!("{}", rule);
    println!("{}", run.final_text());
    println!("{}", rule);
    println!();
    println!("All outputs saved to '{}'", run.output_path.display());
    println!("Workflow completed successfully!");
}
