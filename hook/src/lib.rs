//! Stop-hook decision engine for an autonomous multi-agent dev workflow.
//!
//! After each specialized agent (planner, developer, tester, debugger)
//! finishes its turn, the host runtime invokes this hook. The hook inspects
//! persisted workflow state and decides whether to route the workflow to the
//! next agent or let it end. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (snapshot types, routing policy,
//!   test-output classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting collaborators (hook payloads, status document,
//!   transcript window, decision log). Isolated to enable tempdir tests.
//!
//! Orchestration modules ([`stop`], [`observe`]) coordinate core logic with
//! I/O to implement the hook subcommands.

pub mod core;
pub mod io;
pub mod logging;
pub mod observe;
pub mod stop;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
