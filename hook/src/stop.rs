//! Orchestration for one stop-hook invocation.
//!
//! Gating, snapshot selection, and policy evaluation in a single pass:
//! the authoritative status document is tried first, transcript heuristics
//! cover its absence. Returns at most one decision; `None` means the
//! workflow is left alone.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::engine;
use crate::core::types::{AgentRole, RoutingDecision, StatusSource};
use crate::io::config::load_config;
use crate::io::decision_log::{DecisionLogEntry, append_entry};
use crate::io::hook_event::{HookDecision, HookEvent};
use crate::io::status_doc::read_status_doc;
use crate::io::transcript::{
    detect_completed_agent, extract_signals, is_autonomous_run, read_window,
};

/// Evaluate a stop event against workflow state under `root`.
pub fn run_stop(root: &Path, event: &HookEvent) -> Result<Option<HookDecision>> {
    let cfg = load_config(root)?;

    let Some(transcript_path) = event.transcript_path.as_deref() else {
        debug!("no transcript path in payload, taking no action");
        return Ok(None);
    };
    let window = read_window(transcript_path, cfg.transcript_window_bytes)?;

    if !is_autonomous_run(&window) {
        debug!("no autonomous-workflow evidence in transcript, taking no action");
        return Ok(None);
    }

    let completed = detect_completed_agent(&window);
    let status_doc_path = root.join(&cfg.status_doc_path);
    let source = match read_status_doc(&status_doc_path)? {
        Some(snapshot) => StatusSource::Document(snapshot),
        None => StatusSource::Transcript(extract_signals(&window)),
    };

    let decision = engine::decide(&source, completed);
    log_decision(root, &cfg.decision_log_path, event, &source, completed, &decision);

    match decision.routing {
        RoutingDecision::Advance { instruction, .. } => {
            Ok(Some(HookDecision::block(instruction)))
        }
        RoutingDecision::Halt => Ok(None),
    }
}

fn log_decision(
    root: &Path,
    log_path: &str,
    event: &HookEvent,
    source: &StatusSource,
    completed: AgentRole,
    decision: &engine::Decision,
) {
    let (action, detail) = match &decision.routing {
        RoutingDecision::Advance { next, .. } => {
            ("advance", format!("{} -> {}", completed.label(), next.label()))
        }
        RoutingDecision::Halt => ("halt", completed.label().to_string()),
    };
    let entry = DecisionLogEntry {
        event: "stop",
        session_id: event.session_id.clone(),
        source: match source {
            StatusSource::Document(_) => "document".to_string(),
            StatusSource::Transcript(_) => "transcript".to_string(),
        },
        rule: decision.rule.to_string(),
        action: action.to_string(),
        detail,
    };
    // A failed log write must not discard an already computed decision.
    if let Err(err) = append_entry(&root.join(log_path), &entry) {
        warn!(error = %format!("{err:#}"), "decision log write failed");
    }
}
