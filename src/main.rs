//! Quill: a three-agent research, writing and editing pipeline.
//!
//! This is the main entry point for the `quill` CLI. It loads `.env`, sets up
//! logging, parses arguments, dispatches to the appropriate command handler,
//! and handles errors with proper exit codes.

mod agent;
mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod model;
pub mod pipeline;
pub mod runlog;
pub mod tasks;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; the key may come from the shell.
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            log::debug!("exiting with code {}: {:?}", err.exit_code(), err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
