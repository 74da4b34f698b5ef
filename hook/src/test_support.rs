//! Test-only helpers for constructing snapshots and hook workdirs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::types::{
    Phase, StatusSnapshot, TestOutcome, TranscriptOutcome, TranscriptSignals,
};
use crate::io::hook_event::HookEvent;

/// Snapshot with phases 1-3 recorded complete and the given outcome.
pub fn snapshot_through_phase3(outcome: TestOutcome) -> StatusSnapshot {
    StatusSnapshot {
        current_phase: Phase::Testing,
        phase1_complete: true,
        phase2_complete: true,
        phase3_complete: true,
        phase3_outcome: outcome,
        debug_iteration: 0,
    }
}

/// Fallback signals with deterministic defaults.
pub fn signals(outcome: TranscriptOutcome, debug_iterations: u32) -> TranscriptSignals {
    TranscriptSignals {
        outcome,
        debug_iterations,
    }
}

/// Temporary working directory holding a transcript and optional status
/// document, shaped the way the hook expects at runtime.
pub struct TestWorkdir {
    temp: tempfile::TempDir,
}

impl TestWorkdir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_status_doc(&self, contents: &str) -> Result<()> {
        let path = self.root().join("PROJECT_STATUS.md");
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn write_transcript(&self, contents: &str) -> Result<()> {
        let path = self.root().join("transcript.jsonl");
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Stop-hook event pointing at this workdir's transcript.
    pub fn stop_event(&self) -> HookEvent {
        HookEvent {
            session_id: "test-session".to_string(),
            hook_event_name: "Stop".to_string(),
            transcript_path: Some(self.root().join("transcript.jsonl")),
            cwd: Some(self.root().to_path_buf()),
            ..HookEvent::default()
        }
    }
}
