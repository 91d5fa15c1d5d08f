//! Markdown report generator
//!
//! Generates prediction reports as Markdown tables. These render well in
//! GitHub, GitLab, and VS Code.

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/prediction.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();
        output = output.replace("{{headline}}", &ctx.headline());
        output = output.replace("{{target}}", &ctx.target_label());

        let summary = ctx.summary();
        let field = |text: Option<String>| text.unwrap_or_else(|| "n/a".to_string());
        output = output.replace(
            "{{current_cgpa}}",
            &field(summary.map(|s| format!("{:.2} ({})", s.current_cgpa, s.current_class))),
        );
        output = output.replace(
            "{{completed_credits}}",
            &field(summary.map(|s| format!("{:.1}", s.completed_credits))),
        );
        output = output.replace(
            "{{remaining_credits}}",
            &field(summary.map(|s| {
                format!("{:.1} ({} courses)", s.remaining_credits, s.remaining_courses)
            })),
        );
        output = output.replace(
            "{{required_average}}",
            &field(summary.map(|s| {
                s.required_average
                    .map_or_else(|| "none".to_string(), |r| format!("{r:.2}"))
            })),
        );
        output = output.replace(
            "{{max_cgpa}}",
            &field(summary.map(|s| {
                format!("{:.2} ({})", s.max_attainable_cgpa, s.max_attainable_class)
            })),
        );
        output = output.replace(
            "{{thresholds}}",
            &field(summary.map(|s| s.thresholds.to_string())),
        );

        let verdict = ctx
            .verdict
            .map_or_else(String::new, |v| format!("> {v}"));
        output = output.replace("{{verdict}}", &verdict);

        output = output.replace("{{combinations}}", &Self::generate_combinations_table(ctx));
        output = output.replace("{{scenarios}}", &Self::generate_scenarios_table(ctx));
        output
    }

    /// Generate the ranked combinations table
    fn generate_combinations_table(ctx: &ReportContext) -> String {
        let combinations = ctx.combinations();
        if combinations.is_empty() {
            return "_No combinations to show._".to_string();
        }

        let mut table = String::new();
        let _ = writeln!(
            table,
            "| Rank | Breakdown | Average GPA | Total Points | Projected CGPA | Class |"
        );
        let _ = writeln!(
            table,
            "|------|-----------|-------------|--------------|----------------|-------|"
        );
        for combo in combinations {
            let _ = writeln!(
                table,
                "| {} | {} | {:.2} | {:.1} | {:.2} | {} |",
                combo.rank,
                combo.breakdown_label(),
                combo.average_gpa,
                combo.total_points,
                combo.projected_final_cgpa,
                combo.resulting_class
            );
        }
        table
    }

    /// Generate the uniform scenario table
    fn generate_scenarios_table(ctx: &ReportContext) -> String {
        if ctx.scenarios.is_empty() {
            return "_No scenarios._".to_string();
        }

        let mut table = String::new();
        let _ = writeln!(table, "| Rank | Grade | Average | Projected CGPA | Class |");
        let _ = writeln!(table, "|------|-------|---------|----------------|-------|");
        for row in ctx.scenarios {
            let _ = writeln!(
                table,
                "| {} | {} | {:.2} | {:.2} | {} |",
                row.rank,
                row.letter,
                row.average_on_remaining,
                row.projected_final_cgpa,
                row.achievable_class
            );
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::fixtures;

    #[test]
    fn test_markdown_contains_tables() {
        let (outcome, scenarios) = fixtures::predicted();
        let ctx = ReportContext::new(&outcome, &scenarios, None);
        let md = MarkdownReporter::new().render(&ctx).expect("render");

        assert!(md.starts_with("# Grade Prediction Report"));
        assert!(md.contains("| 1 | 10×A | 4.00 | 120.0 | 3.67 |"));
        assert!(md.contains("| Target | First Class (3.60) |"));
        assert!(md.contains("| Required average | 3.80 |"));
        assert!(!md.contains("{{"));
    }

    #[test]
    fn test_markdown_impossible_has_no_rows() {
        let outcome = fixtures::impossible();
        let ctx = ReportContext::new(&outcome, &[], None);
        let md = MarkdownReporter::new().render(&ctx).expect("render");
        assert!(md.contains("_No combinations to show._"));
        assert!(md.contains("mathematically impossible"));
    }
}
