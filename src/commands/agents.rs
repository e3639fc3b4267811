//! Implementation of the `quill agents` command.
//!
//! Lists the resolved crew without touching the network or the API key.

use crate::agent::Crew;
use crate::cli::AgentsArgs;
use crate::config::Config;
use crate::error::Result;
use std::fmt::Write;

/// Execute the `quill agents` command.
pub fn cmd_agents(args: AgentsArgs) -> Result<()> {
    let config = Config::resolve(args.config.as_deref())?;
    let crew = Crew::from_config(&config)?;
    print!("{}", format_crew(&crew));
    Ok(())
}

fn format_crew(crew: &Crew) -> String {
    let mut out = String::new();
    for (stage, agent) in crew.iter() {
        let _ = writeln!(
            out,
            "{}. {:<9} {} [{}]",
            stage.step_number(),
            stage.as_str(),
            agent.role(),
            agent.model()
        );
        let _ = writeln!(out, "   goal: {}", agent.goal());
    }
    out
}
