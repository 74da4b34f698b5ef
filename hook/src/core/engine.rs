//! Routing policy: converts a status snapshot into a routing decision.
//!
//! Both policies are explicit ordered lists of guarded rules, first match
//! wins, so each rule stays auditable and testable on its own. The engine is
//! a pure function from snapshot to decision; it owns no state between
//! invocations and never mutates the status document.

use tracing::{debug, warn};

use crate::core::types::{
    AgentRole, Phase, RoutingDecision, StatusSnapshot, StatusSource, TestOutcome,
    TranscriptOutcome, TranscriptSignals,
};

/// Fixed budget of debug-fix-retest cycles per failing-test episode.
pub const MAX_DEBUG_ITERATIONS: u32 = 5;

/// A routing decision together with the rule that produced it.
///
/// The rule label feeds the diagnostic channels only; it is never part of
/// the decision payload handed to the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub routing: RoutingDecision,
    pub rule: &'static str,
}

impl Decision {
    fn halt(rule: &'static str) -> Self {
        Self {
            routing: RoutingDecision::Halt,
            rule,
        }
    }

    fn advance(rule: &'static str, next: AgentRole, instruction: String) -> Self {
        Self {
            routing: RoutingDecision::Advance { next, instruction },
            rule,
        }
    }
}

/// Decide the next routing action from whichever snapshot source is available.
pub fn decide(source: &StatusSource, completed: AgentRole) -> Decision {
    let decision = match source {
        StatusSource::Document(snapshot) => decide_from_snapshot(snapshot, completed),
        StatusSource::Transcript(signals) => decide_from_signals(signals, completed),
    };
    debug!(
        completed = completed.label(),
        rule = decision.rule,
        advance = decision.routing.is_advance(),
        "routing decided"
    );
    decision
}

/// Primary policy over the authoritative document snapshot.
pub fn decide_from_snapshot(snapshot: &StatusSnapshot, completed: AgentRole) -> Decision {
    let snapshot = normalize_snapshot(snapshot);

    if snapshot.phase1_complete && !snapshot.phase2_complete && completed == AgentRole::Planner {
        return Decision::advance(
            "plan-to-develop",
            AgentRole::Developer,
            "Read the status document and the implementation plan again, then invoke the \
             developer agent to implement the plan. Follow test-first development: write each \
             test before the code that makes it pass."
                .to_string(),
        );
    }

    if snapshot.phase2_complete && !snapshot.phase3_complete && completed == AgentRole::Developer {
        return Decision::advance(
            "develop-to-test",
            AgentRole::Tester,
            "Read the test plan again, then invoke the tester agent to run the functional \
             tests and record the results in the status document."
                .to_string(),
        );
    }

    if snapshot.phase3_complete && completed == AgentRole::Tester {
        match snapshot.phase3_outcome {
            TestOutcome::Passed => return Decision::halt("tests-passed"),
            TestOutcome::Failed => {
                if snapshot.debug_iteration >= MAX_DEBUG_ITERATIONS {
                    warn!(
                        iterations = snapshot.debug_iteration,
                        budget = MAX_DEBUG_ITERATIONS,
                        "debug iteration budget exhausted, letting the workflow end"
                    );
                    return Decision::halt("debug-budget-exhausted");
                }
                return Decision::advance(
                    "test-failure-to-debug",
                    AgentRole::Debugger,
                    format!(
                        "Invoke the debugger agent to analyze the test failure details \
                         recorded in the status document (debug iteration {}/{}).",
                        snapshot.debug_iteration + 1,
                        MAX_DEBUG_ITERATIONS
                    ),
                );
            }
            TestOutcome::None => {}
        }
    }

    if completed == AgentRole::Debugger {
        return Decision::advance(
            "debug-to-develop",
            AgentRole::Developer,
            "Invoke the developer agent to implement the fixes recommended by the debugger, \
             keeping test-first discipline for any new tests."
                .to_string(),
        );
    }

    if completed == AgentRole::Developer && snapshot.debug_iteration > 0 {
        return Decision::advance(
            "fix-to-retest",
            AgentRole::Tester,
            format!(
                "Invoke the tester agent to re-run the functional tests (re-test at \
                 iteration {}/{}).",
                snapshot.debug_iteration, MAX_DEBUG_ITERATIONS
            ),
        );
    }

    Decision::halt("no-rule")
}

/// Fallback policy over transcript-derived signals.
pub fn decide_from_signals(signals: &TranscriptSignals, completed: AgentRole) -> Decision {
    match completed {
        AgentRole::Planner => Decision::advance(
            "fallback-plan-to-develop",
            AgentRole::Developer,
            "Invoke the developer agent with the planner's full implementation plan as \
             context, following test-first development."
                .to_string(),
        ),
        AgentRole::Developer if signals.debug_iterations == 0 => Decision::advance(
            "fallback-develop-to-test",
            AgentRole::Tester,
            "Invoke the tester agent to verify the implementation by running the functional \
             tests."
                .to_string(),
        ),
        AgentRole::Developer => Decision::advance(
            "fallback-fix-to-retest",
            AgentRole::Tester,
            format!(
                "Invoke the tester agent to re-run the functional tests (iteration {}).",
                signals.debug_iterations
            ),
        ),
        AgentRole::Tester => match signals.outcome {
            TranscriptOutcome::Passed => Decision::halt("fallback-tests-passed"),
            TranscriptOutcome::Failed => {
                if signals.debug_iterations >= MAX_DEBUG_ITERATIONS {
                    warn!(
                        iterations = signals.debug_iterations,
                        budget = MAX_DEBUG_ITERATIONS,
                        "debug iteration budget exhausted, letting the workflow end"
                    );
                    Decision::halt("fallback-debug-budget-exhausted")
                } else {
                    Decision::advance(
                        "fallback-test-failure-to-debug",
                        AgentRole::Debugger,
                        format!(
                            "Invoke the debugger agent to analyze the test failures \
                             (debug iteration {}/{}).",
                            signals.debug_iterations + 1,
                            MAX_DEBUG_ITERATIONS
                        ),
                    )
                }
            }
            TranscriptOutcome::NoTests => Decision::halt("fallback-no-tests"),
            TranscriptOutcome::Unknown => Decision::halt("fallback-no-rule"),
        },
        AgentRole::Debugger => Decision::advance(
            "fallback-debug-to-develop",
            AgentRole::Developer,
            "Invoke the developer agent with the debugger's full analysis as context."
                .to_string(),
        ),
        AgentRole::Unknown => Decision::halt("fallback-no-rule"),
    }
}

/// Zero a stale iteration counter when the document reports a fresh testing
/// episode (testing phase entered, no outcome recorded yet).
///
/// The status document is mutated only by the agents, so the counter from a
/// previous failing episode may still be visible when re-testing begins; it
/// must not eat into the new episode's budget.
pub fn normalize_snapshot(snapshot: &StatusSnapshot) -> StatusSnapshot {
    let mut normalized = *snapshot;
    if normalized.current_phase == Phase::Testing && normalized.phase3_outcome == TestOutcome::None
    {
        normalized.debug_iteration = 0;
    }
    normalized
}
