//! Integration tests for transcript parsing and CGPA calculation.

use grade_target::core::transcript::Transcript;
use grade_target::{GradeScale, PredictError, ThresholdTable};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/transcripts/sample.csv")
}

#[test]
fn sample_transcript_summary() {
    let transcript = Transcript::from_csv_file(sample_path()).expect("sample parses");
    assert_eq!(transcript.courses().len(), 8);

    let summary = transcript
        .summarize(&GradeScale::university(), &ThresholdTable::standard())
        .expect("sample is valid");

    // 80 grade points over 23 credits
    assert!((summary.cgpa - 80.0 / 23.0).abs() < 1e-9);
    assert!((summary.total_credits - 23.0).abs() < 1e-9);
    assert!((summary.total_grade_points - 80.0).abs() < 1e-9);
    assert_eq!(summary.classification.name, "Second Class Upper");
    assert_eq!(summary.statistics.course_count, 8);
    assert_eq!(summary.statistics.highest_grade, "A");
    assert_eq!(summary.statistics.lowest_grade, "C+");
    assert_eq!(summary.advice.target, "First Class");
    assert!((summary.advice.improvement - (3.6 - 80.0 / 23.0)).abs() < 1e-9);
}

#[test]
fn rounded_table_is_applied() {
    let transcript = Transcript::new()
        .with_course("Algorithms", 3.0, "A")
        .with_course("Databases", 3.0, "A")
        .with_course("Networks", 3.0, "A")
        .with_course("Compilers", 3.0, "B+")
        .with_course("Graphics", 3.0, "B+");
    let scale = GradeScale::university();

    // 3.80 under either table
    let strong = transcript
        .summarize(&scale, &ThresholdTable::rounded())
        .expect("valid");
    assert_eq!(strong.classification.name, "First Class");

    let borderline = Transcript::new()
        .with_course("Seminar", 1.0, "A")
        .with_course("Economics", 6.0, "B+");
    let standard = borderline
        .summarize(&scale, &ThresholdTable::standard())
        .expect("valid");
    // 25 points over 7 credits: 3.57
    let rounded = borderline
        .summarize(&scale, &ThresholdTable::rounded())
        .expect("valid");
    assert_eq!(standard.classification.name, "Second Class Upper");
    assert_eq!(rounded.classification.name, "First Class");
}

#[test]
fn malformed_rows_are_all_reported() {
    let csv = "Course,Credits,Grade\nA1,three,A\nA2,3,B\nA3,x,C\n";
    let Err(PredictError::Transcript(errors)) = Transcript::from_csv_str(csv) else {
        panic!("expected transcript errors");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Line 2"));
    assert!(errors[1].starts_with("Line 4"));
}

#[test]
fn invalid_grades_and_credits_fail_summary() {
    let transcript = Transcript::new()
        .with_course("Chemistry", 3.0, "Z")
        .with_course("Biology", 9.0, "A");
    let Err(PredictError::Transcript(errors)) =
        transcript.summarize(&GradeScale::university(), &ThresholdTable::standard())
    else {
        panic!("expected transcript errors");
    };
    assert_eq!(errors.len(), 2);
}

#[test]
fn fail_alias_counts_as_zero() {
    let summary = Transcript::new()
        .with_course("History", 3.0, "A")
        .with_course("Art", 3.0, "F")
        .summarize(&GradeScale::university(), &ThresholdTable::standard())
        .expect("F is accepted");
    assert!((summary.cgpa - 2.0).abs() < 1e-9);
    assert_eq!(summary.statistics.lowest_grade, "E");
}
