//! Hook payload parsing and decision emission.
//!
//! The host runtime supplies one JSON payload on stdin per invocation and
//! consumes at most one JSON decision object on stdout. No output means
//! "do not interfere". Parsing is lenient: unknown fields are ignored and
//! missing fields default, so payload evolution never breaks the hook.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Event payload identifying the agent/tool invocation that just finished.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HookEvent {
    pub session_id: String,
    pub hook_event_name: String,
    /// Path to the event-log artifact for this session.
    pub transcript_path: Option<PathBuf>,
    /// Working directory of the workflow; status document and logs are
    /// resolved relative to it.
    pub cwd: Option<PathBuf>,
    pub tool_name: Option<String>,
    pub tool_input: Option<ToolInput>,
    pub tool_response: Option<ToolResponse>,
}

/// Command record for a tool invocation (observe path only).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolInput {
    pub command: Option<String>,
}

/// Output record for a tool invocation (observe path only).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolResponse {
    pub output: Option<String>,
}

/// Structured decision object consumed by the host runtime.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HookDecision {
    /// Decision keyword; `"block"` on the stop path (keep the workflow
    /// going), `"continue"` on the observe path (advisory annotation).
    pub decision: &'static str,
    /// Free-text next-step instruction or annotation.
    pub reason: String,
}

impl HookDecision {
    pub fn block(reason: String) -> Self {
        Self {
            decision: "block",
            reason,
        }
    }

    pub fn advisory(reason: String) -> Self {
        Self {
            decision: "continue",
            reason,
        }
    }
}

/// Parse a hook event from a JSON string.
pub fn parse_event(payload: &str) -> Result<HookEvent> {
    serde_json::from_str(payload).context("parse hook event payload")
}

/// Read and parse the hook event from a reader (stdin in production).
pub fn read_event<R: Read>(mut reader: R) -> Result<HookEvent> {
    let mut payload = String::new();
    reader
        .read_to_string(&mut payload)
        .context("read hook event payload")?;
    parse_event(&payload)
}

/// Render a decision as the single-line JSON object the host expects.
pub fn render_decision(decision: &HookDecision) -> Result<String> {
    serde_json::to_string(decision).context("serialize decision")
}
