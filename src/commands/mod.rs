//! Command implementations for quill.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod agents;
mod prompt;
mod run;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Agents(args) => agents::cmd_agents(args),
        Command::Prompt(args) => prompt::cmd_prompt(args),
    }
}
