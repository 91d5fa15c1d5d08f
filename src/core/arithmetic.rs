//! CGPA arithmetic: weighted averages and projections

use crate::core::error::PredictError;
use crate::core::models::{AcademicState, GradeScale};

/// Largest credit load accepted for a single course
pub const MAX_COURSE_CREDITS: f64 = 6.0;

/// Tolerance for CGPA and average comparisons
pub const CGPA_EPSILON: f64 = 1e-9;

/// Credit-weighted mean grade point of `(credits, grade)` pairs.
///
/// Returns 0.0 for an empty list; callers treat that as "no data" rather
/// than a real CGPA of zero. The result does not depend on course order.
///
/// # Errors
/// Returns an error if a course has credits outside `(0, 6]` or a grade
/// missing from `scale`.
pub fn weighted_average<S: AsRef<str>>(
    courses: &[(f64, S)],
    scale: &GradeScale,
) -> Result<f64, PredictError> {
    let mut total_credits = 0.0;
    let mut total_points = 0.0;

    for (position, (credits, grade)) in courses.iter().enumerate() {
        let credits = *credits;
        if !credits.is_finite() || credits <= 0.0 || credits > MAX_COURSE_CREDITS {
            return Err(PredictError::CourseCreditsOutOfRange {
                course: format!("#{}", position + 1),
                value: credits,
                max: MAX_COURSE_CREDITS,
            });
        }
        let points = scale
            .points(grade.as_ref())
            .ok_or_else(|| PredictError::UnknownGrade {
                grade: grade.as_ref().to_string(),
            })?;
        total_credits += credits;
        total_points += credits * points;
    }

    if total_credits > 0.0 {
        Ok(total_points / total_credits)
    } else {
        Ok(0.0)
    }
}

/// Final CGPA if the remaining credits average `average_on_remaining`.
///
/// Returns 0.0 when both credit counts are zero.
#[must_use]
pub fn projected_final_cgpa(
    current_cgpa: f64,
    completed_credits: f64,
    remaining_credits: f64,
    average_on_remaining: f64,
) -> f64 {
    let total = completed_credits + remaining_credits;
    if total == 0.0 {
        return 0.0;
    }
    current_cgpa.mul_add(
        completed_credits,
        average_on_remaining * remaining_credits,
    ) / total
}

/// [`projected_final_cgpa`] for an [`AcademicState`]
#[must_use]
pub fn project(state: &AcademicState, average_on_remaining: f64) -> f64 {
    projected_final_cgpa(
        state.current_cgpa,
        state.completed_credits,
        state.remaining_credits,
        average_on_remaining,
    )
}

/// Average grade point needed on the remaining credits to finish at
/// `target_cgpa`. `None` when no credits remain.
///
/// The value can be negative (any grades suffice) or above the scale's
/// maximum (target unreachable).
#[must_use]
pub fn required_average(state: &AcademicState, target_cgpa: f64) -> Option<f64> {
    if state.remaining_credits <= 0.0 {
        return None;
    }
    Some(
        target_cgpa.mul_add(
            state.total_credits(),
            -(state.current_cgpa * state.completed_credits),
        ) / state.remaining_credits,
    )
}

/// Feasibility bound: final CGPA with the top grade in every remaining course
#[must_use]
pub fn max_attainable_cgpa(state: &AcademicState, scale: &GradeScale) -> f64 {
    project(state, scale.max_points())
}

/// Whether an average of `required` is reachable on `scale`
#[must_use]
pub fn is_reachable(required: f64, scale: &GradeScale) -> bool {
    required <= scale.max_points() + CGPA_EPSILON
}
