//! Tests for the run command.

use super::*;
use crate::agent::ERROR_PREFIX;
use crate::model::ModelError;
use crate::pipeline::NoopObserver;
use crate::test_support::ScriptedGenerator;
use serde_json::Value;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config_in(dir: &Path) -> Config {
    Config {
        output_path: dir.join("output.txt"),
        log_path: dir.join("quill-run.ndjson"),
        ..Default::default()
    }
}

fn with_key(name: &str) -> Option<String> {
    (name == "GOOGLE_API_KEY").then(|| "test-key".to_string())
}

fn read_events(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_missing_credential_makes_no_calls_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());
    let generator = ScriptedGenerator::new(["R1", "A1", "E1"]);
    let mut connected = false;

    let err = execute(
        &config,
        &mut NoopObserver,
        |_| None,
        |_| {
            connected = true;
            Ok(&generator)
        },
    )
    .unwrap_err();

    assert!(matches!(err, QuillError::ConfigError(_)));
    assert!(err.to_string().contains("GOOGLE_API_KEY not found"));
    assert!(!connected);
    assert!(generator.calls().is_empty());
    assert!(!config.output_path.exists());
}

#[test]
fn test_end_to_end_threads_context_and_writes_artifact() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());
    let generator = ScriptedGenerator::new(["R1", "A1", "E1"]);

    let run = execute(&config, &mut NoopObserver, with_key, |ctx| {
        assert_eq!(ctx.api_key, "test-key");
        Ok(&generator)
    })
    .unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].prompt.contains("Context from previous work: \n"));
    assert!(calls[1].prompt.contains("Context from previous work: R1\n"));
    assert!(calls[2].prompt.contains("Context from previous work: A1\n"));
    assert!(calls.iter().all(|c| c.model == config.model));

    let written = fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(written, run.artifact);
    assert!(written.starts_with("RESEARCH FINDINGS:\n"));
    assert!(written.ends_with("FINAL ARTICLE:\n==================================================\nE1"));
    assert_eq!(run.final_text(), "E1");
    assert!(!run.is_degraded());
}

#[test]
fn test_topic_reaches_task_descriptions() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        topic: "Urban beekeeping".to_string(),
        ..config_in(temp.path())
    };
    let generator = ScriptedGenerator::new(["R1", "A1", "E1"]);

    execute(&config, &mut NoopObserver, with_key, |_| Ok(&generator)).unwrap();

    let calls = generator.calls();
    assert!(calls[0].prompt.contains("Urban beekeeping"));
}

#[test]
fn test_model_failure_is_carried_forward() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());
    let generator = ScriptedGenerator::from_results(vec![
        Ok("R1".to_string()),
        Err(ModelError::QuotaExceeded {
            status: 429,
            message: "quota".to_string(),
        }),
        Ok("E1".to_string()),
    ]);

    let run = execute(&config, &mut NoopObserver, with_key, |_| Ok(&generator)).unwrap();

    assert!(run.is_degraded());
    let calls = generator.calls();
    assert!(calls[2].prompt.contains(ERROR_PREFIX));

    let written = fs::read_to_string(&config.output_path).unwrap();
    assert!(written.contains("DRAFT ARTICLE:\n==================================================\nError executing task: "));
}

#[test]
fn test_connect_failure_is_propagated() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());

    let err = execute::<_, _, ScriptedGenerator>(&config, &mut NoopObserver, with_key, |_| {
        Err(QuillError::ConfigError("no client".to_string()))
    })
    .unwrap_err();

    assert!(matches!(err, QuillError::ConfigError(_)));
    assert!(!config.output_path.exists());
}

#[test]
fn test_console_progress_records_stage_events() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());
    let run_log = RunLog::new(&config.log_path);
    let generator = ScriptedGenerator::from_results(vec![
        Ok("R1".to_string()),
        Ok("A1".to_string()),
        Err(ModelError::Request("connection reset".to_string())),
    ]);

    let mut progress = ConsoleProgress::new(&run_log, config.preview_chars, true);
    execute(&config, &mut progress, with_key, |_| Ok(&generator)).unwrap();

    let events = read_events(&config.log_path);
    let actions: Vec<&str> = events
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(
        actions,
        vec![
            "stage_started",
            "stage_completed",
            "stage_started",
            "stage_completed",
            "stage_started",
            "stage_degraded",
        ]
    );
    assert_eq!(events[0]["stage"], "research");
    assert_eq!(events[5]["stage"], "editing");
    assert!(
        events[5]["details"]["error"]
            .as_str()
            .unwrap()
            .starts_with(ERROR_PREFIX)
    );
}

#[test]
fn test_run_failed_event_carries_detail() {
    let temp = TempDir::new().unwrap();
    let config = config_in(temp.path());
    let run_log = RunLog::new(&config.log_path);

    record_failure(&run_log, &QuillError::ConfigError("bad".to_string()));

    let events = read_events(&config.log_path);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["action"], "run_failed");
    assert_eq!(events[0]["details"]["exit_code"], 2);
    assert!(
        events[0]["details"]["detail"]
            .as_str()
            .unwrap()
            .contains("ConfigError")
    );
}

#[test]
#[serial]
fn test_cmd_run_without_key_logs_run_failed() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("output.txt");
    let log_path = temp.path().join("quill-run.ndjson");
    let config_path = temp.path().join("quill.yaml");
    fs::write(
        &config_path,
        format!(
            "api_key_env: QUILL_RUN_TEST_KEY\noutput_path: {}\nlog_path: {}\n",
            output.display(),
            log_path.display()
        ),
    )
    .unwrap();

    // SAFETY: serialized with other environment-mutating tests.
    unsafe { std::env::remove_var("QUILL_RUN_TEST_KEY") };

    let err = cmd_run(RunArgs {
        config: Some(config_path),
        topic: None,
        output: None,
        model: None,
        quiet: true,
    })
    .unwrap_err();

    assert!(matches!(err, QuillError::ConfigError(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("QUILL_RUN_TEST_KEY not found"));
    assert!(!output.exists());

    let events = read_events(&log_path);
    let actions: Vec<&str> = events
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["run_started", "run_failed"]);
    assert_eq!(events[1]["details"]["exit_code"], 2);
    assert!(
        events[1]["details"]["error"]
            .as_str()
            .unwrap()
            .contains("QUILL_RUN_TEST_KEY not found")
    );
}
