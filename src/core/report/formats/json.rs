//! JSON report generator

use crate::core::prediction::PredictionOutcome;
use crate::core::report::{ReportContext, ReportGenerator};
use crate::core::scenarios::{UniformScenario, Verdict};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct JsonReport<'a> {
    headline: String,
    outcome: &'a PredictionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<&'a Verdict>,
    scenarios: &'a [UniformScenario],
}

/// Pretty-printed JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let report = JsonReport {
            headline: ctx.headline(),
            outcome: ctx.outcome,
            verdict: ctx.verdict,
            scenarios: ctx.scenarios,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
