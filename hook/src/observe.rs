//! Orchestration for one tool-observation invocation.
//!
//! Peripheral path: annotates individual tool invocations with a pass/fail
//! verdict. Advisory only; nothing here feeds the routing policy.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::classifier::{classify, is_test_command};
use crate::io::config::load_config;
use crate::io::decision_log::{DecisionLogEntry, append_entry};
use crate::io::hook_event::{HookDecision, HookEvent};

/// Annotate a finished tool invocation when it ran a known test runner.
pub fn run_observe(root: &Path, event: &HookEvent) -> Result<Option<HookDecision>> {
    let cfg = load_config(root)?;

    // Only shell invocations carry test-runner commands; other tools
    // (file edits, searches) are out of scope.
    if event.tool_name.as_deref() != Some("Bash") {
        debug!(tool = ?event.tool_name, "non-shell tool, taking no action");
        return Ok(None);
    }
    let Some(command) = event
        .tool_input
        .as_ref()
        .and_then(|input| input.command.as_deref())
    else {
        debug!("no command in tool payload, taking no action");
        return Ok(None);
    };
    if !is_test_command(command) {
        return Ok(None);
    }

    let output = event
        .tool_response
        .as_ref()
        .and_then(|response| response.output.as_deref())
        .unwrap_or("");
    let verdict = classify(output);
    debug!(command, verdict = verdict.label(), "test command observed");

    let entry = DecisionLogEntry {
        event: "observe",
        session_id: event.session_id.clone(),
        source: "tool-output".to_string(),
        rule: verdict.label().to_string(),
        action: "annotate".to_string(),
        detail: command.to_string(),
    };
    if let Err(err) = append_entry(&root.join(&cfg.decision_log_path), &entry) {
        warn!(error = %format!("{err:#}"), "decision log write failed");
    }

    Ok(Some(HookDecision::advisory(format!(
        "test command `{}` classified as {}",
        command,
        verdict.label()
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestWorkdir;
    use crate::io::hook_event::{ToolInput, ToolResponse};
    use std::fs;

    fn tool_event(command: &str, output: &str) -> HookEvent {
        HookEvent {
            session_id: "test-session".to_string(),
            hook_event_name: "PostToolUse".to_string(),
            tool_name: Some("Bash".to_string()),
            tool_input: Some(ToolInput {
                command: Some(command.to_string()),
            }),
            tool_response: Some(ToolResponse {
                output: Some(output.to_string()),
            }),
            ..HookEvent::default()
        }
    }

    #[test]
    fn annotates_test_commands() {
        let workdir = TestWorkdir::new().expect("workdir");
        let event = tool_event("cargo test", "test result: ok. 4 passed; 0 failed");

        let decision = run_observe(workdir.root(), &event)
            .expect("run")
            .expect("decision");
        assert_eq!(decision.decision, "continue");
        assert!(decision.reason.contains("passed"));

        let log = fs::read_to_string(workdir.root().join(".autodev/logs/decisions.log"))
            .expect("read log");
        assert!(log.contains("\"event\":\"observe\""));
        assert!(log.contains("cargo test"));
    }

    #[test]
    fn ignores_non_test_commands() {
        let workdir = TestWorkdir::new().expect("workdir");
        let event = tool_event("cargo build", "Compiling...");
        let decision = run_observe(workdir.root(), &event).expect("run");
        assert_eq!(decision, None);
        assert!(!workdir.root().join(".autodev/logs/decisions.log").exists());
    }

    /// Only shell tool invocations are classified; a test-looking command
    /// arriving through another tool is ignored.
    #[test]
    fn ignores_non_shell_tools() {
        let workdir = TestWorkdir::new().expect("workdir");
        let mut event = tool_event("cargo test", "4 passed; 0 failed");
        event.tool_name = Some("Edit".to_string());
        assert_eq!(run_observe(workdir.root(), &event).expect("run"), None);
        event.tool_name = None;
        assert_eq!(run_observe(workdir.root(), &event).expect("run"), None);
    }

    #[test]
    fn missing_output_classifies_as_unknown() {
        let workdir = TestWorkdir::new().expect("workdir");
        let mut event = tool_event("pytest", "");
        event.tool_response = None;
        let decision = run_observe(workdir.root(), &event)
            .expect("run")
            .expect("decision");
        assert!(decision.reason.contains("unknown"));
    }
}
