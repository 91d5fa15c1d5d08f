//! Calculate command handler
//!
//! Reads a transcript CSV and prints the CGPA, class of degree, per-course
//! grade points and advice toward the top class.

use super::fail;
use grade_target::core::config::Config;
use grade_target::core::models::{GradeScale, ThresholdTable};
use grade_target::core::transcript::{Transcript, TranscriptSummary};
use grade_target::logger::{info, verbose};
use std::path::Path;

/// Run the calculate command.
///
/// # Arguments
/// * `input_file` - Transcript CSV with course, credits and grade columns
/// * `json` - Print the summary as JSON instead of a table
/// * `config` - Configuration providing the threshold table
pub fn run(input_file: &Path, json: bool, config: &Config) -> bool {
    let transcript = match Transcript::from_csv_file(input_file) {
        Ok(t) => t,
        Err(e) => {
            return fail(
                &format!("Failed to read transcript {}", input_file.display()),
                &e,
            )
        }
    };
    verbose!(
        "Loaded {} courses from {}",
        transcript.courses().len(),
        input_file.display()
    );

    let scale = GradeScale::university();
    let table = ThresholdTable::for_variant(config.prediction.thresholds);
    let summary = match transcript.summarize(&scale, &table) {
        Ok(s) => s,
        Err(e) => return fail("Invalid transcript", &e),
    };
    info!(
        "Calculated CGPA {:.2} over {} credits",
        summary.cgpa, summary.total_credits
    );

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => return fail("Failed to serialize summary", &e),
        }
    } else {
        print_summary(&summary);
    }
    true
}

fn print_summary(summary: &TranscriptSummary) {
    println!("\n=== Transcript ===\n");
    println!(
        "{:<32} {:>7} {:>6} {:>7} {:>9}",
        "Course", "Credits", "Grade", "Points", "Weighted"
    );
    for course in &summary.courses {
        println!(
            "{:<32} {:>7.1} {:>6} {:>7.2} {:>9.2}",
            course.name, course.credits, course.grade, course.grade_point, course.course_grade_points
        );
    }

    let stats = &summary.statistics;
    println!();
    println!("CGPA:          {:.2}", summary.cgpa);
    println!("Class:         {}", summary.classification.name);
    println!("Total credits: {:.1}", summary.total_credits);
    println!("Grade points:  {:.2}", summary.total_grade_points);
    println!(
        "Courses:       {} (average {:.1} credits)",
        stats.course_count, stats.average_credits
    );
    println!(
        "Grades:        highest {}, lowest {}",
        stats.highest_grade, stats.lowest_grade
    );
    println!("\n{}: {}", summary.advice.target, summary.advice.message);
}
