//! Shared deterministic types for the routing core.
//!
//! These types define stable contracts between the snapshot sources and the
//! decision engine. They must remain free of I/O and deterministic across
//! invocations: all durable workflow state lives in the externally maintained
//! status document, never in this process.

use serde::{Deserialize, Serialize};

/// Workflow stage reported by the status document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Planning,
    Development,
    Testing,
    Debugging,
    Complete,
    Unknown,
}

/// Role of the specialized agent whose turn just ended.
///
/// Derived from the transcript by the caller; the engine never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Planner,
    Developer,
    Tester,
    Debugger,
    Unknown,
}

impl AgentRole {
    pub fn label(self) -> &'static str {
        match self {
            AgentRole::Planner => "planner",
            AgentRole::Developer => "developer",
            AgentRole::Tester => "tester",
            AgentRole::Debugger => "debugger",
            AgentRole::Unknown => "unknown",
        }
    }
}

/// Recorded outcome of the functional-testing phase.
///
/// `None` means the testing phase has not recorded a result yet; it is only
/// meaningful alongside `phase3_complete` (see [`StatusSnapshot`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Passed,
    Failed,
    None,
}

/// Test outcome detected from transcript text on the fallback path.
///
/// Cruder than [`TestOutcome`]: `NoTests` exists only here because the status
/// document never records it, while transcripts routinely say so explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptOutcome {
    Passed,
    Failed,
    NoTests,
    Unknown,
}

/// Authoritative description of where the workflow stands at decision time.
///
/// Parsed from the status document. Completion flags are monotonic within a
/// run: once a phase is recorded complete it is never reported incomplete
/// again. `debug_iteration` is advisory and only consulted while
/// `phase3_outcome` is `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub current_phase: Phase,
    pub phase1_complete: bool,
    pub phase2_complete: bool,
    pub phase3_complete: bool,
    pub phase3_outcome: TestOutcome,
    /// Completed debug-fix-retest cycles within the current failing episode.
    pub debug_iteration: u32,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            current_phase: Phase::Unknown,
            phase1_complete: false,
            phase2_complete: false,
            phase3_complete: false,
            phase3_outcome: TestOutcome::None,
            debug_iteration: 0,
        }
    }
}

/// Degraded snapshot scraped from the transcript window.
///
/// Used only when the status document is absent or carries no recognized
/// marker; accepts a higher false-classification rate by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSignals {
    pub outcome: TranscriptOutcome,
    /// Transcript-derived proxy for completed debug cycles.
    pub debug_iterations: u32,
}

/// The snapshot the engine decides from: authoritative document when
/// available, transcript heuristics otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSource {
    Document(StatusSnapshot),
    Transcript(TranscriptSignals),
}

/// The engine's output: let the workflow end, or route to the next agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// No further automatic action; the workflow may finish or idle.
    Halt,
    /// Invoke `next` with `instruction` describing the context to re-read.
    Advance {
        next: AgentRole,
        instruction: String,
    },
}

impl RoutingDecision {
    pub fn is_advance(&self) -> bool {
        matches!(self, RoutingDecision::Advance { .. })
    }
}
