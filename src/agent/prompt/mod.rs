//! Prompt construction for agent calls.
//!
//! An agent prompt is the persona, the task and the upstream context
//! substituted into one template. The default template can be replaced from
//! config as long as it only uses [`PROMPT_VARIABLES`].
//!
//! ```text
//! You are a {role}.
//!
//! Your goal: {goal}
//! ...
//! Context from previous work: {context}
//! ```
//!
//! Use `{{` to escape and render a literal `{`.

mod template;

pub use template::{TemplateError, check_template, render_template, vars};

/// Variables available to an agent prompt template.
pub const PROMPT_VARIABLES: &[&str] = &["role", "goal", "backstory", "task", "context"];

/// Variables available to a task description template.
pub const TASK_VARIABLES: &[&str] = &["topic"];

/// Default agent prompt template.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "You are a {role}.

Your goal: {goal}

Your background: {backstory}

Task: {task}

Context from previous work: {context}

Please complete this task with high quality output.
";

/// The values substituted into one agent prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptInputs<'a> {
    pub role: &'a str,
    pub goal: &'a str,
    pub backstory: &'a str,
    pub task: &'a str,
    pub context: &'a str,
}

/// Render `template` with the given inputs.
pub fn render_prompt(template: &str, inputs: PromptInputs<'_>) -> Result<String, TemplateError> {
    let variables = vars([
        ("role", inputs.role),
        ("goal", inputs.goal),
        ("backstory", inputs.backstory),
        ("task", inputs.task),
        ("context", inputs.context),
    ]);
    render_template(template, &variables)
}
