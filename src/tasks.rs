//! Task descriptions for the three pipeline stages.
//!
//! The built-in descriptions brief each stage on `{topic}`. Config can replace
//! any of them. The registry only stores and renders text; whether a
//! description is usable is decided by the pipeline.

use crate::agent::prompt::{TemplateError, render_template, vars};
use crate::config::Config;
use crate::error::{QuillError, Result};
use crate::pipeline::Stage;

/// Built-in research brief.
pub const RESEARCH_TASK: &str = r#"Research the topic: "{topic}"

Your research should include:
1. Current applications of {topic}
2. Emerging trends and technologies
3. Potential benefits and challenges
4. Future predictions and developments

Provide a comprehensive overview with key findings and insights.
"#;

/// Built-in writing brief.
pub const WRITING_TASK: &str = r#"Based on the research findings, create an engaging article about "{topic}".

The article should:
1. Have a compelling introduction
2. Present information in an accessible way
3. Include relevant examples and case studies
4. Be well-structured with clear sections
5. Conclude with thoughtful insights about the future

Target audience: General public interested in {topic}
"#;

/// Built-in editing brief.
pub const EDITING_TASK: &str = r#"Review and edit the article about "{topic}" to ensure:
1. Clarity and readability
2. Accuracy of information
3. Proper grammar and style
4. Logical flow and structure
5. Engaging tone throughout

Make necessary improvements while maintaining the original message and style.
"#;

/// The rendered task description for each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistry {
    research: String,
    writing: String,
    editing: String,
}

impl TaskRegistry {
    /// Build the registry from literal descriptions, without rendering.
    pub fn new(
        research: impl Into<String>,
        writing: impl Into<String>,
        editing: impl Into<String>,
    ) -> Self {
        Self {
            research: research.into(),
            writing: writing.into(),
            editing: editing.into(),
        }
    }

    /// Render the built-in or configured descriptions for `config.topic`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let render = |stage: Stage, builtin: &str| -> Result<String> {
            let template = config
                .tasks
                .get(&stage)
                .map(String::as_str)
                .unwrap_or(builtin);
            render_task(template, &config.topic).map_err(|e| {
                QuillError::ConfigError(format!("{} task description: {}", stage, e))
            })
        };

        Ok(Self {
            research: render(Stage::Research, RESEARCH_TASK)?,
            writing: render(Stage::Writing, WRITING_TASK)?,
            editing: render(Stage::Editing, EDITING_TASK)?,
        })
    }

    /// The description for `stage`.
    pub fn get(&self, stage: Stage) -> &str {
        match stage {
            Stage::Research => &self.research,
            Stage::Writing => &self.writing,
            Stage::Editing => &self.editing,
        }
    }
}

fn render_task(template: &str, topic: &str) -> std::result::Result<String, TemplateError> {
    render_template(template, &vars([("topic", topic)]))
}
