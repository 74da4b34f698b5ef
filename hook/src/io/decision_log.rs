//! Append-only decision log under `.autodev/logs/`.
//!
//! Product artifact recording every routing decision and tool annotation,
//! one JSON object per line. Always written, unaffected by `RUST_LOG`;
//! dev tracing lives in `logging`. Never mixed into the stdout payload.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One diagnostic entry, serialized as a JSON line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DecisionLogEntry {
    /// Hook path that produced the entry (`stop` or `observe`).
    pub event: &'static str,
    pub session_id: String,
    /// Snapshot source or classification subject.
    pub source: String,
    /// Fired rule label, or the classifier verdict on the observe path.
    pub rule: String,
    /// `advance`, `halt`, `no-op`, or a verdict label.
    pub action: String,
    /// Completed agent, next agent, or annotated command.
    pub detail: String,
}

/// Append an entry to the decision log, creating parents as needed.
pub fn append_entry(path: &Path, entry: &DecisionLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let mut line = serde_json::to_string(entry).context("serialize log entry")?;
    line.push('\n');
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open decision log {}", path.display()))?;
    file.write_all(line.as_bytes())
        .with_context(|| format!("append decision log {}", path.display()))?;
    Ok(())
}
