//! Scenarios command handler

use super::fail;
use crate::args::StateArgs;
use grade_target::core::classify::{classify, Target};
use grade_target::core::config::Config;
use grade_target::core::models::{GradeScale, ThresholdTable};
use grade_target::core::scenarios::{uniform_scenarios, verdict};
use grade_target::logger::debug;

/// Print the final CGPA each uniform grade would give, and optionally the
/// verdict for `target`.
pub fn run(args: &StateArgs, target: Option<&str>, config: &Config) -> bool {
    let state = match args.to_state(config.prediction.credits_per_course) {
        Ok(s) => s,
        Err(e) => return fail("Invalid academic state", &e),
    };
    let scale = GradeScale::university();
    let table = ThresholdTable::for_variant(config.prediction.thresholds);
    debug!(
        "Scenarios for CGPA {:.2} with {} of {} credits remaining",
        state.current_cgpa,
        state.remaining_credits,
        state.total_credits()
    );

    println!(
        "Current: {:.2} ({})",
        state.current_cgpa,
        classify(state.current_cgpa, &table).name
    );

    if let Some(text) = target {
        let target: Target = match text.parse() {
            Ok(t) => t,
            Err(e) => return fail("Invalid target", &e),
        };
        match target.threshold(&table) {
            Ok(Some(cgpa)) => println!("{target}: {}", verdict(&state, cgpa, &scale)),
            Ok(None) => println!("{target}: every grade combination qualifies"),
            Err(e) => return fail("Invalid target", &e),
        }
    }

    if state.is_complete() {
        println!("No credits remain.");
        return true;
    }

    println!(
        "\n{:<5} {:<6} {:>8} {:>10}  Class",
        "Rank", "Grade", "Average", "Final CGPA"
    );
    for row in uniform_scenarios(&state, &scale, &table) {
        println!(
            "{:<5} {:<6} {:>8.2} {:>10.2}  {}",
            row.rank, row.letter, row.average_on_remaining, row.projected_final_cgpa, row.achievable_class
        );
    }
    true
}
