//! Classify command handler

use super::fail;
use grade_target::core::classify::classify;
use grade_target::core::config::Config;
use grade_target::core::models::{ThresholdTable, MAX_CGPA};
use grade_target::logger::verbose;

/// Print the class of degree for `cgpa`
pub fn run(cgpa: f64, config: &Config) -> bool {
    if !(0.0..=MAX_CGPA).contains(&cgpa) {
        return fail(
            "Invalid CGPA",
            &format!("{cgpa} is outside 0.00-{MAX_CGPA:.2}"),
        );
    }

    let table = ThresholdTable::for_variant(config.prediction.thresholds);
    let tier = classify(cgpa, &table);
    verbose!(
        "Classified {cgpa:.2} with the {} table",
        config.prediction.thresholds
    );

    println!("{cgpa:.2} → {}", tier.name);
    println!("  {}", tier.meta.description);
    match tier.max_cgpa {
        Some(max) => println!("  Range: {:.2} to below {max:.2}", tier.min_cgpa),
        None => println!("  Range: {:.2} and above", tier.min_cgpa),
    }
    true
}
