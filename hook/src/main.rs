//! Stop-hook router for the autonomous dev workflow.
//!
//! Reads one hook payload from stdin, evaluates workflow state, and prints
//! at most one JSON decision object to stdout. Exits 0 in every case: a
//! hook failure must never stall the host runtime, so errors are logged to
//! stderr and converted into a silent no-op.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use autodev_hook::io::hook_event::{HookDecision, HookEvent, read_event, render_decision};
use autodev_hook::{logging, observe, stop};
use clap::{Parser, Subcommand};
use tracing::error;

#[derive(Parser)]
#[command(
    name = "autodev-hook",
    version,
    about = "Routing decisions for the autonomous dev workflow"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether to route the workflow to the next agent (Stop hook).
    Stop,
    /// Annotate a finished tool invocation with a test verdict (PostToolUse hook).
    Observe,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        // Degrade to "do not interfere" rather than blocking the host.
        error!(error = %format!("{err:#}"), "hook failed, taking no action");
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let event = read_event(io::stdin().lock())?;
    let root = resolve_root(&event)?;

    let decision = match cli.command {
        Command::Stop => stop::run_stop(&root, &event)?,
        Command::Observe => observe::run_observe(&root, &event)?,
    };
    if let Some(decision) = decision {
        emit(&decision)?;
    }
    Ok(())
}

/// Workflow working directory: payload `cwd` when present, process cwd otherwise.
fn resolve_root(event: &HookEvent) -> Result<PathBuf> {
    match &event.cwd {
        Some(cwd) => Ok(cwd.clone()),
        None => std::env::current_dir().context("resolve current directory"),
    }
}

fn emit(decision: &HookDecision) -> Result<()> {
    println!("{}", render_decision(decision)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stop() {
        let cli = Cli::parse_from(["autodev-hook", "stop"]);
        assert!(matches!(cli.command, Command::Stop));
    }

    #[test]
    fn parse_observe() {
        let cli = Cli::parse_from(["autodev-hook", "observe"]);
        assert!(matches!(cli.command, Command::Observe));
    }

    #[test]
    fn resolve_root_prefers_payload_cwd() {
        let event = HookEvent {
            cwd: Some(PathBuf::from("/work")),
            ..HookEvent::default()
        };
        assert_eq!(resolve_root(&event).expect("root"), PathBuf::from("/work"));
    }
}
