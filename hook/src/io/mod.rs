//! I/O collaborators for the hook subcommands.

pub mod config;
pub mod decision_log;
pub mod hook_event;
pub mod status_doc;
pub mod transcript;
