//! Agent personas and task execution.

use super::prompt::{
    DEFAULT_PROMPT_TEMPLATE, PROMPT_VARIABLES, PromptInputs, TemplateError, check_template,
    render_prompt,
};
use crate::model::{DEFAULT_MODEL, ModelError, TextGenerator};
use std::fmt;

/// Prefix of the text returned in place of a result when a task fails.
pub const ERROR_PREFIX: &str = "Error executing task: ";

/// A fixed persona bound to a text-generation model.
///
/// Fields are set at construction and never change; only the task and the
/// context vary between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    role: String,
    goal: String,
    backstory: String,
    model: String,
    prompt_template: String,
}

impl Agent {
    /// Create an agent using the default model and prompt template.
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            model: DEFAULT_MODEL.to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }

    /// Bind the agent to a different model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the prompt template.
    ///
    /// Fails if the template does not parse or uses a variable outside
    /// [`PROMPT_VARIABLES`].
    pub fn with_prompt_template(
        mut self,
        template: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let template = template.into();
        check_template(&template, PROMPT_VARIABLES)?;
        self.prompt_template = template;
        Ok(self)
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the prompt this agent would send for a task.
    pub fn build_prompt(&self, task_description: &str, context: &str) -> Result<String, TemplateError> {
        render_prompt(
            &self.prompt_template,
            PromptInputs {
                role: &self.role,
                goal: &self.goal,
                backstory: &self.backstory,
                task: task_description,
                context,
            },
        )
    }

    /// Run a task and keep success and failure apart.
    ///
    /// Issues exactly one `generate` call. The generated text is returned
    /// verbatim.
    pub fn try_execute_task(
        &self,
        generator: &dyn TextGenerator,
        task_description: &str,
        context: &str,
    ) -> TaskOutcome {
        let prompt = match self.build_prompt(task_description, context) {
            Ok(prompt) => prompt,
            // Templates are checked on construction, so this only fires if
            // that check and rendering ever disagree.
            Err(e) => return TaskOutcome::Failed(format!("prompt template error: {}", e)),
        };

        match generator.generate(&self.model, &prompt) {
            Ok(text) => TaskOutcome::Completed(text),
            Err(e) => {
                log::warn!("[AGENT] {} task failed: {}", self.role, e);
                TaskOutcome::from(e)
            }
        }
    }

    /// Run a task and return its text.
    ///
    /// Model failures are not returned as errors: they come back as
    /// `"Error executing task: <message>"`, which callers cannot tell apart
    /// from generated content. Use [`Agent::try_execute_task`] to tell them
    /// apart.
    pub fn execute_task(
        &self,
        generator: &dyn TextGenerator,
        task_description: &str,
        context: &str,
    ) -> String {
        self.try_execute_task(generator, task_description, context)
            .into_text()
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.role, self.model)
    }
}

/// Outcome of one agent task before it is flattened into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The model's generated text.
    Completed(String),
    /// The failure message, without the error prefix.
    Failed(String),
}

impl TaskOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failed(_))
    }

    /// The text downstream stages and the artifact see.
    pub fn to_text(&self) -> String {
        match self {
            TaskOutcome::Completed(text) => text.clone(),
            TaskOutcome::Failed(message) => format!("{}{}", ERROR_PREFIX, message),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            TaskOutcome::Completed(text) => text,
            TaskOutcome::Failed(message) => format!("{}{}", ERROR_PREFIX, message),
        }
    }
}

impl From<ModelError> for TaskOutcome {
    fn from(err: ModelError) -> Self {
        TaskOutcome::Failed(err.to_string())
    }
}

/// The built-in research analyst persona.
pub fn researcher() -> Agent {
    Agent::new(
        "Research Analyst",
        "Gather and analyze information on given topics",
        "You are an experienced research analyst with expertise in data collection and analysis. \
         You excel at finding relevant information and presenting it in a clear, structured manner.",
    )
}

/// The built-in content writer persona.
pub fn writer() -> Agent {
    Agent::new(
        "Content Writer",
        "Create engaging and informative content based on research findings",
        "You are a skilled content writer who specializes in transforming research data into \
         compelling narratives. You have a talent for making complex information accessible and engaging.",
    )
}

/// The built-in content editor persona.
pub fn editor() -> Agent {
    Agent::new(
        "Content Editor",
        "Review and refine content for clarity, accuracy, and quality",
        "You are a meticulous editor with an eye for detail. You ensure content is polished, \
         accurate, and meets high quality standards before publication.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedGenerator;

    #[test]
    fn test_execute_task_returns_text_verbatim() {
        let generator = ScriptedGenerator::new(["  Findings\n with spacing  "]);
        let text = researcher().execute_task(&generator, "Research AI", "");
        assert_eq!(text, "  Findings\n with spacing  ");
    }

    #[test]
    fn test_execute_task_makes_one_call_with_agent_model() {
        let generator = ScriptedGenerator::new(["ok"]);
        let agent = writer().with_model("gemini-2.5-pro");

        agent.execute_task(&generator, "Write", "notes");

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gemini-2.5-pro");
    }

    #[test]
    fn test_prompt_contains_persona_task_and_context() {
        let generator = ScriptedGenerator::new(["ok"]);
        let agent = editor();

        agent.execute_task(&generator, "Polish the article", "DRAFT BODY");

        let prompt = &generator.calls()[0].prompt;
        assert!(prompt.starts_with("You are a Content Editor.\n"));
        assert!(prompt.contains("Your goal: Review and refine content"));
        assert!(prompt.contains("Your background: You are a meticulous editor"));
        assert!(prompt.contains("Task: Polish the article\n"));
        assert!(prompt.contains("Context from previous work: DRAFT BODY\n"));
    }

    #[test]
    fn test_model_error_is_stringified() {
        let generator = ScriptedGenerator::from_results(vec![Err(ModelError::Status {
            status: 403,
            message: "API key not valid".to_string(),
        })]);

        let text = researcher().execute_task(&generator, "Research", "");
        assert_eq!(
            text,
            "Error executing task: API error (403): API key not valid"
        );
    }

    #[test]
    fn test_try_execute_task_distinguishes_failure() {
        let generator = ScriptedGenerator::from_results(vec![
            Ok("fine".to_string()),
            Err(ModelError::Request("connection reset".to_string())),
        ]);
        let agent = researcher();

        let ok = agent.try_execute_task(&generator, "t", "");
        assert_eq!(ok, TaskOutcome::Completed("fine".to_string()));
        assert!(!ok.is_failure());

        let failed = agent.try_execute_task(&generator, "t", "");
        assert!(failed.is_failure());
        assert_eq!(
            failed.to_text(),
            "Error executing task: request failed: connection reset"
        );
    }

    #[test]
    fn test_with_prompt_template_rejects_unknown_variable() {
        let err = researcher()
            .with_prompt_template("You are {role} in {city}")
            .unwrap_err();
        assert!(matches!(err, TemplateError::UndefinedVariable { ref name, .. } if name == "city"));
    }

    #[test]
    fn test_custom_prompt_template_is_used() {
        let generator = ScriptedGenerator::new(["ok"]);
        let agent = researcher()
            .with_prompt_template("[{role}] {task} | {context}")
            .unwrap();

        agent.execute_task(&generator, "dig", "prior");

        assert_eq!(generator.calls()[0].prompt, "[Research Analyst] dig | prior");
    }

    #[test]
    fn test_default_personas_use_default_model() {
        for agent in [researcher(), writer(), editor()] {
            assert_eq!(agent.model(), DEFAULT_MODEL);
        }
        assert_eq!(researcher().to_string(), "Research Analyst (gemini-2.5-flash)");
    }
}
