//! The three agents of one process, resolved from config.

use super::persona::{Agent, editor, researcher, writer};
use crate::config::{Config, PersonaOverride};
use crate::error::{QuillError, Result};
use crate::pipeline::Stage;

/// One agent per pipeline stage.
///
/// Built once at startup and borrowed by the pipeline for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crew {
    researcher: Agent,
    writer: Agent,
    editor: Agent,
}

impl Crew {
    pub fn new(researcher: Agent, writer: Agent, editor: Agent) -> Self {
        Self {
            researcher,
            writer,
            editor,
        }
    }

    /// The built-in personas on the default model.
    pub fn builtin() -> Self {
        Self::new(researcher(), writer(), editor())
    }

    /// Build the crew from config.
    ///
    /// Each agent starts from its built-in persona, takes `config.model`, and
    /// then applies its stage's override from `config.agents`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let build = |stage: Stage, base: Agent| -> Result<Agent> {
            let agent = apply_override(base.with_model(&config.model), config.agents.get(&stage));
            match &config.prompt_template {
                Some(template) => agent.with_prompt_template(template.as_str()).map_err(|e| {
                    QuillError::ConfigError(format!("prompt_template for {} agent: {}", stage, e))
                }),
                None => Ok(agent),
            }
        };

        Ok(Self {
            researcher: build(Stage::Research, researcher())?,
            writer: build(Stage::Writing, writer())?,
            editor: build(Stage::Editing, editor())?,
        })
    }

    /// The agent responsible for `stage`.
    pub fn agent(&self, stage: Stage) -> &Agent {
        match stage {
            Stage::Research => &self.researcher,
            Stage::Writing => &self.writer,
            Stage::Editing => &self.editor,
        }
    }

    /// Agents in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &Agent)> {
        Stage::ORDER.into_iter().map(move |stage| (stage, self.agent(stage)))
    }
}

fn apply_override(base: Agent, persona: Option<&PersonaOverride>) -> Agent {
    let Some(persona) = persona else {
        return base;
    };

    // Resets the prompt template to the default; `from_config` applies the
    // configured one afterwards.
    Agent::new(
        persona.role.as_deref().unwrap_or(base.role()),
        persona.goal.as_deref().unwrap_or(base.goal()),
        persona.backstory.as_deref().unwrap_or(base.backstory()),
    )
    .with_model(persona.model.as_deref().unwrap_or(base.model()))
}
