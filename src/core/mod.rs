//! Core domain logic: CGPA arithmetic, classification and grade prediction

pub mod arithmetic;
pub mod classify;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod prediction;
pub mod ranking;
pub mod report;
pub mod scenarios;
pub mod transcript;

/// Returns the current version of the `GradeTarget` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
