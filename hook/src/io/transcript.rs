//! Transcript signal extraction: the degraded fallback snapshot source.
//!
//! Scans a rolling tail window of the event-log text for coarse markers.
//! This path exists only to keep the workflow moving when the status
//! document is unavailable; it accepts a higher false-classification rate.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::types::{AgentRole, TranscriptOutcome, TranscriptSignals};

/// Literal command token that triggers the autonomous workflow.
pub const TRIGGER_TOKEN: &str = "/autodev";

/// Literal phrase naming the autonomous workflow in agent output.
pub const WORKFLOW_PHRASE: &str = "autonomous development workflow";

/// Directive issued when routing to the debugger; counted as an iteration
/// proxy on the fallback path.
const DEBUGGER_DIRECTIVE: &str = "use the debugger";

/// Structured invocation marker naming the role of an invoked agent.
static SUBAGENT_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#""subagent_type"\s*:\s*"(planner|developer|tester|debugger)""#).unwrap()
});

/// Secondary outcome signals: explicit counts in test-runner output.
static PASS_ZERO_FAIL_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\d+\s+passed\b[^\n]*\b0\s+failed\b").unwrap());
static NONZERO_FAIL_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\b[1-9]\d*\s+failed\b").unwrap());

/// Read the transcript's tail window, lowercased for marker scanning.
///
/// An unreadable transcript degrades to an empty window (logged, never an
/// error): gating then fails and the hook does not interfere.
pub fn read_window(path: &Path, window_bytes: usize) -> Result<String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "transcript unreadable");
            return Ok(String::new());
        }
    };
    Ok(tail_window(&contents, window_bytes).to_lowercase())
}

/// Last `window_bytes` of `text`, snapped forward to a char boundary.
fn tail_window(text: &str, window_bytes: usize) -> &str {
    if text.len() <= window_bytes {
        return text;
    }
    let mut start = text.len() - window_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

/// Gating signal: true iff the window shows evidence of the autonomous
/// workflow (command trigger or workflow-name phrase).
///
/// Checked before either policy so the hook never interferes with
/// unrelated agent activity.
pub fn is_autonomous_run(window: &str) -> bool {
    window.contains(TRIGGER_TOKEN) || window.contains(WORKFLOW_PHRASE)
}

/// Identify the agent whose turn just ended.
///
/// Structured invocation markers win; the last one in the window is the most
/// recent completion. Without any, role-characteristic phrase fragments are
/// tried in rule order, first match wins.
pub fn detect_completed_agent(window: &str) -> AgentRole {
    if let Some(caps) = SUBAGENT_RE.captures_iter(window).last() {
        let role = match &caps[1] {
            "planner" => AgentRole::Planner,
            "developer" => AgentRole::Developer,
            "tester" => AgentRole::Tester,
            _ => AgentRole::Debugger,
        };
        debug!(role = role.label(), "completed agent from invocation marker");
        return role;
    }

    let role = if window.contains("implementation plan:")
        || window.contains("## requirements summary")
    {
        AgentRole::Planner
    } else if window.contains("implementation complete") || window.contains("files created:") {
        AgentRole::Developer
    } else if window.contains("test results:")
        || window.contains("tests passed")
        || window.contains("tests failed")
    {
        AgentRole::Tester
    } else if window.contains("debugging analysis") || window.contains("root cause:") {
        AgentRole::Debugger
    } else {
        AgentRole::Unknown
    };
    debug!(role = role.label(), "completed agent from phrase fragments");
    role
}

/// Extract the degraded snapshot used by the fallback policy.
pub fn extract_signals(window: &str) -> TranscriptSignals {
    let signals = TranscriptSignals {
        outcome: detect_outcome(window),
        debug_iterations: count_debug_iterations(window),
    };
    debug!(
        outcome = ?signals.outcome,
        iterations = signals.debug_iterations,
        "transcript signals extracted"
    );
    signals
}

/// Coarse test-outcome detection, explicit phrases before count patterns.
fn detect_outcome(window: &str) -> TranscriptOutcome {
    if window.contains("test results: passed") || window.contains("all tests passed") {
        return TranscriptOutcome::Passed;
    }
    if window.contains("test results: failed") || window.contains("tests failed") {
        return TranscriptOutcome::Failed;
    }
    if window.contains("no tests found") || window.contains("no automated tests") {
        return TranscriptOutcome::NoTests;
    }
    if PASS_ZERO_FAIL_RE.is_match(window) {
        return TranscriptOutcome::Passed;
    }
    if NONZERO_FAIL_RE.is_match(window) {
        return TranscriptOutcome::Failed;
    }
    TranscriptOutcome::Unknown
}

/// Count completed debug cycles via the routing directive left in the
/// transcript each time the debugger was invoked.
fn count_debug_iterations(window: &str) -> u32 {
    window.matches(DEBUGGER_DIRECTIVE).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn gating_requires_trigger_or_phrase() {
        assert!(is_autonomous_run("user ran /autodev build me a game"));
        assert!(is_autonomous_run(
            "continuing the autonomous development workflow"
        ));
        assert!(!is_autonomous_run("ordinary conversation about tests"));
        assert!(!is_autonomous_run(""));
    }

    #[test]
    fn last_invocation_marker_wins() {
        let window = r#"{"subagent_type": "planner"} ... {"subagent_type": "tester"}"#;
        assert_eq!(detect_completed_agent(window), AgentRole::Tester);
    }

    #[test]
    fn invocation_marker_outranks_phrases() {
        let window = r#"implementation plan: ... {"subagent_type":"developer"}"#;
        assert_eq!(detect_completed_agent(window), AgentRole::Developer);
    }

    #[test]
    fn phrase_fragments_identify_roles_in_rule_order() {
        assert_eq!(
            detect_completed_agent("here is the implementation plan: step 1"),
            AgentRole::Planner
        );
        assert_eq!(
            detect_completed_agent("## requirements summary\n- must parse input"),
            AgentRole::Planner
        );
        assert_eq!(
            detect_completed_agent("implementation complete, files created: src/main.rs"),
            AgentRole::Developer
        );
        assert_eq!(
            detect_completed_agent("test results: 3 run"),
            AgentRole::Tester
        );
        assert_eq!(
            detect_completed_agent("debugging analysis follows. root cause: off-by-one"),
            AgentRole::Debugger
        );
        assert_eq!(detect_completed_agent("hello"), AgentRole::Unknown);
    }

    #[test]
    fn outcome_detection_is_ordered() {
        assert_eq!(
            detect_outcome("test results: passed"),
            TranscriptOutcome::Passed
        );
        assert_eq!(
            detect_outcome("all tests passed after the fix"),
            TranscriptOutcome::Passed
        );
        assert_eq!(
            detect_outcome("3 tests failed in module x"),
            TranscriptOutcome::Failed
        );
        assert_eq!(
            detect_outcome("no tests found in this project"),
            TranscriptOutcome::NoTests
        );
        assert_eq!(
            detect_outcome("summary: 12 passed, 0 failed"),
            TranscriptOutcome::Passed
        );
        assert_eq!(detect_outcome("summary: 2 failed"), TranscriptOutcome::Failed);
        assert_eq!(detect_outcome("compiling..."), TranscriptOutcome::Unknown);
    }

    #[test]
    fn counts_debugger_directives() {
        let window = "use the debugger now ... later: use the debugger again";
        assert_eq!(count_debug_iterations(window), 2);
        assert_eq!(count_debug_iterations("no directives here"), 0);
    }

    #[test]
    fn window_keeps_only_the_tail() {
        let text = format!("{}{}", "a".repeat(100), "tail marker");
        let window = tail_window(&text, 11);
        assert_eq!(window, "tail marker");
        // Short text is returned whole.
        assert_eq!(tail_window("short", 100), "short");
    }

    #[test]
    fn window_snaps_to_char_boundary() {
        let text = format!("{}✅ done", "x".repeat(10));
        // A cut inside the multi-byte checkmark moves forward past it.
        let window = tail_window(&text, 7);
        assert!(window.ends_with("done"));
    }

    #[test]
    fn unreadable_transcript_degrades_to_empty_window() {
        let temp = tempfile::tempdir().expect("tempdir");
        let window = read_window(&temp.path().join("missing.jsonl"), 1000).expect("read");
        assert_eq!(window, "");
    }

    #[test]
    fn read_window_lowercases() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("transcript.jsonl");
        fs::write(&path, "Test Results: PASSED").expect("write");
        let window = read_window(&path, 1000).expect("read");
        assert_eq!(window, "test results: passed");
    }
}
