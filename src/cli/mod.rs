//! CLI argument parsing for quill.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::pipeline::Stage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quill: research, write and edit an article with three model-backed agents.
///
/// A research analyst gathers findings, a writer turns them into a draft and
/// an editor polishes the draft. Each step's output is the next step's
/// context; all three are saved to one text file.
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for quill.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the research, writing and editing stages.
    ///
    /// Requires the API key variable (GOOGLE_API_KEY by default) in the
    /// environment or a .env file. Overwrites the output file on success.
    Run(RunArgs),

    /// List the agents and the model each one uses.
    Agents(AgentsArgs),

    /// Print the prompt a stage would send, without calling the model.
    Prompt(PromptArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Config file (defaults to ./quill.yaml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Topic to research and write about.
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Output file for the research, draft and final article.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model identifier for every agent without a per-stage override.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Only print errors and the output path.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `agents` command.
#[derive(Parser, Debug)]
pub struct AgentsArgs {
    /// Config file (defaults to ./quill.yaml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `prompt` command.
#[derive(Parser, Debug)]
pub struct PromptArgs {
    /// Stage to render.
    #[arg(value_enum)]
    pub stage: Stage,

    /// Config file (defaults to ./quill.yaml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Topic to substitute into the task description.
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Upstream context to include.
    #[arg(long, default_value = "")]
    pub context: String,
}
