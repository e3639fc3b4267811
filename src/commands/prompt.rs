//! Implementation of the `quill prompt` command.
//!
//! Prints the exact prompt a stage would send to the model. Needs no API
//! key and makes no network call.

use crate::agent::Crew;
use crate::cli::PromptArgs;
use crate::config::{Config, ConfigOverrides};
use crate::error::{QuillError, Result};
use crate::pipeline::{Stage, validate_task_description};
use crate::tasks::TaskRegistry;

/// Execute the `quill prompt` command.
pub fn cmd_prompt(args: PromptArgs) -> Result<()> {
    let stage = args.stage;
    let config = Config::resolve(args.config.as_deref())?.with_overrides(ConfigOverrides {
        topic: args.topic,
        ..Default::default()
    })?;

    println!("{}", stage_prompt(&config, stage, &args.context)?);
    Ok(())
}

/// Render the prompt `stage` would send with `context` as upstream output.
fn stage_prompt(config: &Config, stage: Stage, context: &str) -> Result<String> {
    let crew = Crew::from_config(config)?;
    let tasks = TaskRegistry::from_config(config)?;
    let description = tasks.get(stage);
    validate_task_description(stage, description)?;

    crew.agent(stage)
        .build_prompt(description, context)
        .map_err(|e| QuillError::ConfigError(format!("prompt template for {}: {}", stage, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::writer;

    #[test]
    fn test_stage_prompt_uses_agent_and_task() {
        let config = Config {
            topic: "Tidal energy".to_string(),
            ..Default::default()
        };
        let prompt = stage_prompt(&config, Stage::Writing, "R1").unwrap();

        assert!(prompt.starts_with(&format!("You are a {}.", writer().role())));
        assert!(prompt.contains("Tidal energy"));
        assert!(prompt.contains("Context from previous work: R1\n"));
    }

    #[test]
    fn test_stage_prompt_rejects_empty_task() {
        let mut config = Config::default();
        config.tasks.insert(Stage::Editing, "   ".to_string());

        let err = stage_prompt(&config, Stage::Editing, "").unwrap_err();
        assert!(matches!(err, QuillError::ValidationError(_)));
    }
}
