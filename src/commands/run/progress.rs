//! Console progress and run-log events for `quill run`.

use crate::agent::Agent;
use crate::pipeline::{PipelineObserver, Stage, StageRecord};
use crate::runlog::{RunAction, RunEvent, RunLog};
use serde_json::json;

/// Prints stage progress and mirrors stage boundaries into the run log.
pub struct ConsoleProgress<'a> {
    run_log: &'a RunLog,
    preview_chars: usize,
    quiet: bool,
}

impl<'a> ConsoleProgress<'a> {
    pub fn new(run_log: &'a RunLog, preview_chars: usize, quiet: bool) -> Self {
        Self {
            run_log,
            preview_chars,
            quiet,
        }
    }
}

impl PipelineObserver for ConsoleProgress<'_> {
    fn stage_started(&mut self, stage: Stage, agent: &Agent) {
        self.run_log.record(
            RunEvent::new(RunAction::StageStarted)
                .with_stage(stage)
                .with_details(json!({
                    "role": agent.role(),
                    "model": agent.model(),
                    "context_from": stage.upstream().map(|s| s.as_str()),
                })),
        );

        if !self.quiet {
            println!(
                "Step {}: {} {}...",
                stage.step_number(),
                agent.role(),
                stage.activity()
            );
            println!("{}", "-".repeat(40));
        }
    }

    fn stage_completed(&mut self, record: &StageRecord) {
        let text = record.text();
        let event = if record.outcome.is_failure() {
            RunEvent::new(RunAction::StageDegraded).with_details(json!({
                "role": record.role,
                "error": text,
            }))
        } else {
            RunEvent::new(RunAction::StageCompleted).with_details(json!({
                "role": record.role,
                "result_chars": text.chars().count(),
            }))
        };
        self.run_log.record(event.with_stage(record.stage));

        if self.quiet {
            return;
        }

        println!("{}", record.stage.completion_message());
        if let Some(label) = record.stage.preview_label() {
            println!("{}: {}", label, preview(&text, self.preview_chars));
        }
        println!();
        println!("{}", "=".repeat(60));
    }
}

/// The first `max_chars` characters of `text`, with `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("short", 200), "short");
        assert_eq!(preview("", 200), "");
    }

    #[test]
    fn test_preview_exact_length_unchanged() {
        let text = "a".repeat(200);
        assert_eq!(preview(&text, 200), text);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "b".repeat(250);
        let shown = preview(&text, 200);
        assert_eq!(shown.len(), 203);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(preview(&text, 3), "ééé...");
    }
}
