//! End-to-end prediction tests: request in, ranked combinations and reports out.

use grade_target::core::generator::Strategy;
use grade_target::core::prediction::{PredictionOptions, PredictionOutcome};
use grade_target::core::ranking::SelectionMode;
use grade_target::core::report::{reporter_for, ReportContext, ReportFormat};
use grade_target::core::scenarios::{uniform_scenarios, verdict, Verdict};
use grade_target::{
    AcademicState, Constraints, GradeScale, PredictionRequest, Predictor, Target, ThresholdTable,
};
use std::fs;
use tempfile::TempDir;

const EPS: f64 = 1e-9;

fn state(cgpa: f64, completed: f64, remaining: f64) -> AcademicState {
    AcademicState::new(cgpa, completed, remaining, 3.0).expect("valid state")
}

fn second_upper() -> Target {
    Target::Class("Second Class Upper".to_string())
}

#[test]
fn every_presented_combination_reaches_the_target() {
    let request = PredictionRequest::new(state(3.2, 60.0, 15.0), second_upper())
        .with_result_count(10);
    let PredictionOutcome::Predicted(result) = Predictor::default()
        .predict(&request)
        .expect("valid request")
    else {
        panic!("expected combinations");
    };

    assert_eq!(result.strategy, Strategy::Exhaustive);
    assert!(result.complete);
    assert_eq!(result.combinations.len(), 10);
    assert!(result.total_found > 10);
    let summary = &result.summary;
    let required = summary.required_average.expect("target has a threshold");
    assert!((required - 2.2).abs() < 1e-6);

    for (i, combo) in result.combinations.iter().enumerate() {
        assert_eq!(combo.rank, i + 1);
        assert!(combo.projected_final_cgpa >= 3.0 - EPS);
        assert!(combo.average_gpa >= required - EPS);
        let courses: usize = combo.breakdown.iter().map(|g| g.count).sum();
        assert_eq!(courses, 5);
    }
    assert!(result
        .combinations
        .windows(2)
        .all(|w| w[0].average_gpa >= w[1].average_gpa));
}

#[test]
fn representative_selection_reaches_the_low_end() {
    let options = PredictionOptions {
        selection: SelectionMode::Representative,
        ..PredictionOptions::default()
    };
    let request = PredictionRequest::new(state(3.2, 60.0, 15.0), second_upper())
        .with_result_count(6);
    let PredictionOutcome::Predicted(result) = Predictor::new(GradeScale::university(), options)
        .predict(&request)
        .expect("valid request")
    else {
        panic!("expected combinations");
    };

    assert_eq!(result.combinations.len(), 6);
    assert_eq!(result.combinations[0].breakdown_label(), "5×A");
    let last = result.combinations.last().expect("non-empty");
    // the bottom slice sits at the required average
    assert!(last.average_gpa < 2.5);
    assert!(last.projected_final_cgpa >= 3.0 - EPS);
}

#[test]
fn seeded_sampling_is_reproducible() {
    let options = PredictionOptions {
        strategy: Strategy::Sampling,
        sample_seed: Some(2024),
        sample_trials: 3_000,
        ..PredictionOptions::default()
    };
    let predictor = Predictor::new(GradeScale::university(), options);
    let request = PredictionRequest::new(state(2.8, 45.0, 30.0), Target::Cgpa(2.5));

    let first = predictor.predict(&request).expect("valid request");
    let second = predictor.predict(&request).expect("valid request");
    assert_eq!(first, second);
    assert_eq!(first.status(), "predicted");
}

#[test]
fn constraints_flow_through_to_results() {
    let constraints = Constraints::new()
        .max_occurrences_of("A", 2)
        .exclude_grade("E");
    let request = PredictionRequest::new(state(3.0, 60.0, 12.0), Target::AnyAttainable)
        .with_constraints(constraints)
        .with_result_count(50);
    let PredictionOutcome::Predicted(result) = Predictor::default()
        .predict(&request)
        .expect("valid request")
    else {
        panic!("expected combinations");
    };

    assert_eq!(result.combinations[0].breakdown_label(), "2×A, 2×B+");
    for combo in &result.combinations {
        assert!(combo.breakdown.iter().all(|g| g.letter != "E"));
        let top = combo
            .breakdown
            .iter()
            .find(|g| g.letter == "A")
            .map_or(0, |g| g.count);
        assert!(top <= 2);
    }
}

#[test]
fn verdicts_match_prediction_outcomes() {
    let scale = GradeScale::university();
    let table = ThresholdTable::standard();

    let hopeless = state(3.0, 60.0, 30.0);
    assert!(matches!(
        verdict(&hopeless, 3.6, &scale),
        Verdict::Impossible { .. }
    ));
    let outcome = Predictor::default()
        .predict(&PredictionRequest::new(
            hopeless,
            Target::Class("First Class".to_string()),
        ))
        .expect("valid request");
    assert_eq!(outcome.status(), "target_impossible");

    let hopeful = state(3.5, 60.0, 30.0);
    let Verdict::NeedsAverage { required_average } = verdict(&hopeful, 3.6, &scale) else {
        panic!("expected a required average");
    };
    assert!((required_average - 3.8).abs() < 1e-6);

    let rows = uniform_scenarios(&hopeful, &scale, &table);
    assert_eq!(rows[0].letter, "A");
    assert_eq!(rows[0].achievable_class, "First Class");
}

#[test]
fn reports_are_written_in_each_format() {
    let dir = TempDir::new().expect("temp dir");
    let current = state(3.5, 60.0, 30.0);
    let outcome = Predictor::default()
        .predict(&PredictionRequest::new(
            current,
            Target::Class("First Class".to_string()),
        ))
        .expect("valid request");
    let scenarios = uniform_scenarios(
        &current,
        &GradeScale::university(),
        &ThresholdTable::standard(),
    );
    let advice = verdict(&current, 3.6, &GradeScale::university());
    let ctx = ReportContext::new(&outcome, &scenarios, Some(&advice));

    for format in [ReportFormat::Markdown, ReportFormat::Html, ReportFormat::Json] {
        let path = dir.path().join(format!("prediction.{}", format.extension()));
        reporter_for(format)
            .generate(&ctx, &path)
            .expect("report written");
        let content = fs::read_to_string(&path).expect("report readable");
        assert!(content.contains("First Class"), "{format} report names the target");
        if format != ReportFormat::Json {
            assert!(content.contains("3.80"), "{format} report shows the required average");
        }
    }
}
