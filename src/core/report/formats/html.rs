//! HTML report generator
//!
//! Renders a self-contained page through an askama template; values are
//! escaped by the template engine.

use crate::core::models::{ThresholdTable, ThresholdVariant};
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

/// Fallback badge color for classes missing from the table
const NEUTRAL_COLOR: &str = "#6c757d";

/// Label/value pair in the summary table
struct SummaryRow {
    label: &'static str,
    value: String,
}

/// One table row, already formatted
struct ResultRow {
    rank: usize,
    breakdown: String,
    average: String,
    projected: String,
    class_name: String,
    color: String,
}

#[derive(Template)]
#[template(path = "prediction.html")]
struct PredictionPage {
    headline: String,
    summary: Vec<SummaryRow>,
    verdict: Option<String>,
    combinations: Vec<ResultRow>,
    scenarios: Vec<ResultRow>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Collect the template values
    fn build_page(ctx: &ReportContext) -> PredictionPage {
        let table = ThresholdTable::for_variant(
            ctx.summary()
                .map_or(ThresholdVariant::Standard, |s| s.thresholds),
        );
        let color = |class_name: &str| {
            table
                .find(class_name)
                .map_or_else(|| NEUTRAL_COLOR.to_string(), |t| t.meta.color.clone())
        };

        let mut summary = vec![SummaryRow {
            label: "Target",
            value: ctx.target_label(),
        }];
        if let Some(s) = ctx.summary() {
            summary.extend([
                SummaryRow {
                    label: "Current CGPA",
                    value: format!("{:.2} ({})", s.current_cgpa, s.current_class),
                },
                SummaryRow {
                    label: "Credits completed",
                    value: format!("{:.1}", s.completed_credits),
                },
                SummaryRow {
                    label: "Credits remaining",
                    value: format!("{:.1} ({} courses)", s.remaining_credits, s.remaining_courses),
                },
                SummaryRow {
                    label: "Required average",
                    value: s
                        .required_average
                        .map_or_else(|| "none".to_string(), |r| format!("{r:.2}")),
                },
                SummaryRow {
                    label: "Maximum attainable CGPA",
                    value: format!("{:.2} ({})", s.max_attainable_cgpa, s.max_attainable_class),
                },
                SummaryRow {
                    label: "Threshold table",
                    value: s.thresholds.to_string(),
                },
            ]);
        }

        let combinations = ctx
            .combinations()
            .iter()
            .map(|c| ResultRow {
                rank: c.rank,
                breakdown: c.breakdown_label(),
                average: format!("{:.2}", c.average_gpa),
                projected: format!("{:.2}", c.projected_final_cgpa),
                color: color(&c.resulting_class),
                class_name: c.resulting_class.clone(),
            })
            .collect();

        let scenarios = ctx
            .scenarios
            .iter()
            .map(|s| ResultRow {
                rank: s.rank,
                breakdown: s.letter.clone(),
                average: format!("{:.2}", s.average_on_remaining),
                projected: format!("{:.2}", s.projected_final_cgpa),
                color: color(&s.achievable_class),
                class_name: s.achievable_class.clone(),
            })
            .collect();

        PredictionPage {
            headline: ctx.headline(),
            summary,
            verdict: ctx.verdict.map(ToString::to_string),
            combinations,
            scenarios,
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::build_page(ctx).render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::fixtures;
    use crate::core::scenarios::Verdict;

    #[test]
    fn test_html_renders_rows_and_colors() {
        let (outcome, scenarios) = fixtures::predicted();
        let verdict = Verdict::NeedsAverage {
            required_average: 3.8,
        };
        let ctx = ReportContext::new(&outcome, &scenarios, Some(&verdict));
        let html = HtmlReporter::new().render(&ctx).expect("render");

        assert!(html.contains("<title>Grade Prediction Report</title>"));
        assert!(html.contains("10×A"));
        assert!(html.contains("#ffd700"));
        assert!(html.contains("at least 3.80"));
    }

    #[test]
    fn test_html_empty_sections() {
        let outcome = fixtures::impossible();
        let ctx = ReportContext::new(&outcome, &[], None);
        let html = HtmlReporter::new().render(&ctx).expect("render");
        assert!(html.contains("No combinations to show."));
        assert!(html.contains("No scenarios."));
    }
}
