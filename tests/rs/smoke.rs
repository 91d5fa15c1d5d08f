//! Integration smoke tests for `grade_target`

use grade_target::core::get_version;
use grade_target::{AcademicState, PredictionRequest, Predictor, Target};

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn default_predictor_answers_simple_request() {
    let state = AcademicState::new(3.0, 90.0, 6.0, 3.0).expect("valid state");
    let request = PredictionRequest::new(state, Target::AnyAttainable);
    let outcome = Predictor::default().predict(&request).expect("valid request");
    assert_eq!(outcome.status(), "predicted");
}
