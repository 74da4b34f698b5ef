//! Development-time tracing for debugging the hook.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics via `RUST_LOG`, output to stderr.
//!   Not persisted, not part of the hook's product output.
//!
//! - **Decision logging (`io/decision_log`)**: Product artifact in
//!   `.autodev/logs/`. Always written, unaffected by `RUST_LOG`.
//!
//! Stdout is reserved for the decision payload the host runtime consumes, so
//! nothing here may ever write to it.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to `warn` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=autodev_hook=debug autodev-hook stop < payload.json
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
