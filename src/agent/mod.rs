//! Agents: fixed personas bound to a text-generation model.
//!
//! - **Persona**: the `Agent` value and its single operation, `execute_task`
//! - **Crew**: the three agents of a run, resolved from config
//! - **Prompt**: prompt and task templating
//!
//! An agent never lets a model failure escape `execute_task`; the failure is
//! returned as text prefixed with `Error executing task: `. `try_execute_task` keeps
//! the two cases apart for callers that need to know.

mod crew;
mod persona;
pub mod prompt;

// Re-export public API
pub use crew::Crew;
pub use persona::{Agent, TaskOutcome};

#[cfg(test)]
pub use persona::{ERROR_PREFIX, writer};
