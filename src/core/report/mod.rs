//! Report generation for prediction results
//!
//! Renders a prediction outcome, together with the uniform-grade scenario
//! table and the required-average verdict, as Markdown, HTML or JSON.

pub mod formats;

use crate::core::prediction::{PredictionOutcome, PredictionSummary, RankedCombination};
use crate::core::scenarios::{UniformScenario, Verdict};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, JsonReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
///
/// Aggregates everything a template needs so each format reads from the
/// same source.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Prediction answer
    pub outcome: &'a PredictionOutcome,
    /// Uniform-grade projections
    pub scenarios: &'a [UniformScenario],
    /// What the target demands, when the target is a CGPA or class
    pub verdict: Option<&'a Verdict>,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        outcome: &'a PredictionOutcome,
        scenarios: &'a [UniformScenario],
        verdict: Option<&'a Verdict>,
    ) -> Self {
        Self {
            outcome,
            scenarios,
            verdict,
        }
    }

    /// Request overview, absent for a completed program
    #[must_use]
    pub const fn summary(&self) -> Option<&'a PredictionSummary> {
        self.outcome.summary()
    }

    /// Presented combinations (empty unless the prediction succeeded)
    #[must_use]
    pub fn combinations(&self) -> &'a [RankedCombination] {
        match self.outcome {
            PredictionOutcome::Predicted(result) => &result.combinations,
            _ => &[],
        }
    }

    /// One-line statement of the outcome
    #[must_use]
    pub fn headline(&self) -> String {
        match self.outcome {
            PredictionOutcome::ProgramComplete { message, .. } => message.clone(),
            PredictionOutcome::TargetImpossible {
                required_average,
                max_points,
                ..
            } => format!(
                "Target is mathematically impossible: the remaining courses would need an average of {required_average:.2}, above the best grade of {max_points:.2}."
            ),
            PredictionOutcome::NoCombinations { complete, .. } => {
                if *complete {
                    "No grade combination satisfies the constraints.".to_string()
                } else {
                    "Sampling found no grade combination that satisfies the constraints.".to_string()
                }
            }
            PredictionOutcome::Predicted(result) => format!(
                "Showing {} of {} combinations found ({} search{}).",
                result.combinations.len(),
                result.total_found,
                result.strategy,
                if result.complete { "" } else { ", approximate" }
            ),
        }
    }

    /// Target label for headers
    #[must_use]
    pub fn target_label(&self) -> String {
        self.summary().map_or_else(
            || "n/a".to_string(),
            |s| match (&s.target_class, s.target_cgpa) {
                (Some(class), Some(cgpa)) => format!("{class} ({cgpa:.2})"),
                (None, Some(cgpa)) => format!("{cgpa:.2}"),
                _ => s.target.clone(),
            },
        )
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for `format`
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

/// Fixtures shared by the format tests
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::classify::Target;
    use crate::core::models::{AcademicState, GradeScale, ThresholdTable};
    use crate::core::prediction::{PredictionOutcome, PredictionRequest, Predictor};
    use crate::core::scenarios::{uniform_scenarios, UniformScenario};

    pub fn predicted() -> (PredictionOutcome, Vec<UniformScenario>) {
        // ten courses needing a 3.80 average
        let state = AcademicState::new(3.5, 60.0, 30.0, 3.0).expect("valid state");
        let request = PredictionRequest::new(state, Target::Class("First Class".to_string()));
        let outcome = Predictor::default()
            .predict(&request)
            .expect("valid request");
        let scenarios = uniform_scenarios(
            &state,
            &GradeScale::university(),
            &ThresholdTable::standard(),
        );
        (outcome, scenarios)
    }

    pub fn impossible() -> PredictionOutcome {
        let state = AcademicState::new(3.0, 60.0, 30.0, 3.0).expect("valid state");
        let request = PredictionRequest::new(state, Target::Class("First Class".to_string()));
        Predictor::default()
            .predict(&request)
            .expect("valid request")
    }
}
