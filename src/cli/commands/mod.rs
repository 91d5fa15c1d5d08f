//! CLI command handlers for `GradeTarget`.
//!
//! Each subcommand lives in its own submodule. Handlers print results to
//! stdout and return `false` after reporting a failure on stderr.

pub mod calculate;
pub mod classify;
pub mod config;
pub mod predict;
pub mod scenarios;

use grade_target::logger::error;

/// Report a failure to the user and the log
pub fn fail(context: &str, err: &dyn std::fmt::Display) -> bool {
    error!("{context}: {err}");
    eprintln!("✗ {context}: {err}");
    false
}
