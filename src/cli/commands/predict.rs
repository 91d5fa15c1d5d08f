//! Predict command handler
//!
//! Searches for grade combinations on the remaining courses that reach a
//! target, prints them, and optionally writes a report.

use super::fail;
use crate::args::{ConstraintArgs, StateArgs};
use grade_target::core::classify::Target;
use grade_target::core::config::Config;
use grade_target::core::models::{AcademicState, GradeScale, ThresholdTable};
use grade_target::core::prediction::{
    PredictionOutcome, PredictionRequest, PredictionSummary, Predictor,
};
use grade_target::core::ranking::SelectionMode;
use grade_target::core::report::{reporter_for, ReportContext, ReportFormat};
use grade_target::core::scenarios::{uniform_scenarios, verdict};
use grade_target::logger::{info, verbose};
use std::path::{Path, PathBuf};

/// Parsed `predict` flags
pub struct PredictArgs {
    pub state: StateArgs,
    pub target: String,
    pub constraints: ConstraintArgs,
    pub count: Option<usize>,
    pub selection: Option<SelectionMode>,
    pub seed: Option<u64>,
    pub report: Option<String>,
    pub output: Option<PathBuf>,
}

/// Run the predict command.
pub fn run(args: &PredictArgs, config: &Config) -> bool {
    let state = match args.state.to_state(config.prediction.credits_per_course) {
        Ok(s) => s,
        Err(e) => return fail("Invalid academic state", &e),
    };
    let target: Target = match args.target.parse() {
        Ok(t) => t,
        Err(e) => return fail("Invalid target", &e),
    };
    let constraints = match args.constraints.to_constraints() {
        Ok(c) => c,
        Err(e) => return fail("Invalid constraint", &e),
    };
    let format = match args.report.as_deref().map(str::parse::<ReportFormat>) {
        None => None,
        Some(Ok(f)) => Some(f),
        Some(Err(e)) => return fail("Invalid report format", &e),
    };

    let mut options = config.prediction.options();
    if let Some(selection) = args.selection {
        options.selection = selection;
    }
    if args.seed.is_some() {
        options.sample_seed = args.seed;
    }
    let predictor = Predictor::new(GradeScale::university(), options);

    let request = PredictionRequest::new(state, target.clone())
        .with_constraints(constraints)
        .with_result_count(args.count.unwrap_or(config.prediction.result_count))
        .with_thresholds(config.prediction.thresholds);

    verbose!(
        "Predicting for {} remaining courses toward {target} ({} strategy)",
        state.remaining_course_count(),
        options.strategy
    );
    let outcome = match predictor.predict(&request) {
        Ok(o) => o,
        Err(e) => return fail("Prediction failed", &e),
    };
    info!("Prediction finished with status {}", outcome.status());

    print_outcome(&outcome);

    match format {
        Some(format) => write_report(&outcome, &state, &target, format, args.output.as_deref(), config),
        None => true,
    }
}

fn print_outcome(outcome: &PredictionOutcome) {
    if let Some(summary) = outcome.summary() {
        print_summary(summary);
    }
    match outcome {
        PredictionOutcome::ProgramComplete { message, .. } => println!("{message}"),
        PredictionOutcome::TargetImpossible {
            required_average,
            max_points,
            ..
        } => println!(
            "✗ Target is mathematically impossible: you would need an average of {required_average:.2} but the best grade is worth {max_points:.2}."
        ),
        PredictionOutcome::NoCombinations { complete, .. } => {
            if *complete {
                println!("✗ No grade combination satisfies the constraints.");
            } else {
                println!("✗ Sampling found no combination; try more trials or fewer constraints.");
            }
        }
        PredictionOutcome::Predicted(result) => {
            println!(
                "\nShowing {} of {} combinations ({} search{}):\n",
                result.combinations.len(),
                result.total_found,
                result.strategy,
                if result.complete { "" } else { ", approximate" }
            );
            println!(
                "{:<5} {:<28} {:>8} {:>8} {:>10}  Class",
                "Rank", "Grades", "Average", "Points", "Final CGPA"
            );
            for combo in &result.combinations {
                println!(
                    "{:<5} {:<28} {:>8.2} {:>8.1} {:>10.2}  {}",
                    combo.rank,
                    combo.breakdown_label(),
                    combo.average_gpa,
                    combo.total_points,
                    combo.projected_final_cgpa,
                    combo.resulting_class
                );
            }
        }
    }
}

fn print_summary(summary: &PredictionSummary) {
    println!(
        "Current CGPA:     {:.2} ({})",
        summary.current_cgpa, summary.current_class
    );
    println!(
        "Credits:          {:.1} completed, {:.1} remaining ({} courses)",
        summary.completed_credits, summary.remaining_credits, summary.remaining_courses
    );
    println!(
        "Best attainable:  {:.2} ({})",
        summary.max_attainable_cgpa, summary.max_attainable_class
    );
    match summary.target_cgpa {
        Some(cgpa) => println!("Target:           {} ({cgpa:.2})", summary.target),
        None => println!("Target:           {}", summary.target),
    }
    if let Some(required) = summary.required_average {
        println!("Required average: {required:.2}");
    }
}

fn write_report(
    outcome: &PredictionOutcome,
    state: &AcademicState,
    target: &Target,
    format: ReportFormat,
    output: Option<&Path>,
    config: &Config,
) -> bool {
    let scale = GradeScale::university();
    let table = ThresholdTable::for_variant(config.prediction.thresholds);
    let scenarios = if state.is_complete() {
        Vec::new()
    } else {
        uniform_scenarios(state, &scale, &table)
    };
    let target_verdict = match target.threshold(&table) {
        Ok(Some(cgpa)) => Some(verdict(state, cgpa, &scale)),
        _ => None,
    };
    let ctx = ReportContext::new(outcome, &scenarios, target_verdict.as_ref());

    let path = if let Some(path) = output {
        path.to_path_buf()
    } else {
        let dir = PathBuf::from(&config.paths.reports_dir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            return fail(
                &format!("Failed to create reports directory {}", dir.display()),
                &e,
            );
        }
        dir.join(format!("prediction.{}", format.extension()))
    };

    if let Err(e) = reporter_for(format).generate(&ctx, &path) {
        return fail(&format!("Failed to write {format} report"), &e);
    }
    println!("✓ Report generated: {}", path.display());
    true
}
