//! Academic state model

use crate::core::error::PredictError;
use serde::{Deserialize, Serialize};

/// Highest CGPA accepted as input
pub const MAX_CGPA: f64 = 4.0;

/// Tolerance used when flooring credit ratios
const RATIO_EPSILON: f64 = 1e-9;

/// A student's standing at the time of a prediction request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcademicState {
    /// CGPA earned so far, in `[0, 4]`
    pub current_cgpa: f64,
    /// Credits already graded
    pub completed_credits: f64,
    /// Credits still to be taken
    pub remaining_credits: f64,
    /// Credits carried by each remaining course
    pub credits_per_course: f64,
}

impl AcademicState {
    /// Build a validated state.
    ///
    /// # Errors
    /// Returns an error if the CGPA is outside `[0, 4]`, a credit total is
    /// negative or not finite, credits per course is not positive, or both
    /// credit totals are zero.
    pub fn new(
        current_cgpa: f64,
        completed_credits: f64,
        remaining_credits: f64,
        credits_per_course: f64,
    ) -> Result<Self, PredictError> {
        if !current_cgpa.is_finite() || !(0.0..=MAX_CGPA).contains(&current_cgpa) {
            return Err(PredictError::CgpaOutOfRange {
                value: current_cgpa,
                max: MAX_CGPA,
            });
        }
        check_credits("Completed credits", completed_credits)?;
        check_credits("Remaining credits", remaining_credits)?;
        if !credits_per_course.is_finite() || credits_per_course <= 0.0 {
            return Err(PredictError::InvalidCreditsPerCourse {
                value: credits_per_course,
            });
        }
        if completed_credits == 0.0 && remaining_credits == 0.0 {
            return Err(PredictError::NoCredits);
        }

        Ok(Self {
            current_cgpa,
            completed_credits,
            remaining_credits,
            credits_per_course,
        })
    }

    /// Build a state from a remaining course count instead of a credit total.
    ///
    /// # Errors
    /// Same conditions as [`AcademicState::new`].
    #[allow(clippy::cast_precision_loss)]
    pub fn from_course_count(
        current_cgpa: f64,
        completed_credits: f64,
        remaining_courses: usize,
        credits_per_course: f64,
    ) -> Result<Self, PredictError> {
        Self::new(
            current_cgpa,
            completed_credits,
            remaining_courses as f64 * credits_per_course,
            credits_per_course,
        )
    }

    /// Number of whole courses the remaining credits cover
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn remaining_course_count(&self) -> usize {
        (self.remaining_credits / self.credits_per_course + RATIO_EPSILON).floor() as usize
    }

    /// Completed plus remaining credits
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        self.completed_credits + self.remaining_credits
    }

    /// Whether no credits remain
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining_credits == 0.0
    }
}

fn check_credits(field: &'static str, value: f64) -> Result<(), PredictError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PredictError::InvalidCredits { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_count_and_totals() {
        let state = AcademicState::new(3.0, 60.0, 30.0, 3.0).expect("valid state");
        assert_eq!(state.remaining_course_count(), 10);
        assert!((state.total_credits() - 90.0).abs() < f64::EPSILON);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_course_count_floors_partial_course() {
        let state = AcademicState::new(3.0, 60.0, 16.0, 3.0).expect("valid state");
        assert_eq!(state.remaining_course_count(), 5);
    }

    #[test]
    fn test_fractional_credit_ratio() {
        let state = AcademicState::new(3.0, 10.0, 0.3, 0.1).expect("valid state");
        assert_eq!(state.remaining_course_count(), 3);
    }

    #[test]
    fn test_from_course_count() {
        let state = AcademicState::from_course_count(3.2, 60.0, 5, 3.0).expect("valid state");
        assert!((state.remaining_credits - 15.0).abs() < f64::EPSILON);
        assert_eq!(state.remaining_course_count(), 5);
    }

    #[test]
    fn test_rejects_out_of_range_cgpa() {
        assert!(matches!(
            AcademicState::new(4.1, 60.0, 30.0, 3.0),
            Err(PredictError::CgpaOutOfRange { .. })
        ));
        assert!(matches!(
            AcademicState::new(-0.1, 60.0, 30.0, 3.0),
            Err(PredictError::CgpaOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_credits() {
        assert_eq!(
            AcademicState::new(3.0, 0.0, 0.0, 3.0),
            Err(PredictError::NoCredits)
        );
    }

    #[test]
    fn test_rejects_bad_credits() {
        assert!(matches!(
            AcademicState::new(3.0, -1.0, 30.0, 3.0),
            Err(PredictError::InvalidCredits { .. })
        ));
        assert!(matches!(
            AcademicState::new(3.0, 60.0, f64::NAN, 3.0),
            Err(PredictError::InvalidCredits { .. })
        ));
        assert!(matches!(
            AcademicState::new(3.0, 60.0, 30.0, 0.0),
            Err(PredictError::InvalidCreditsPerCourse { .. })
        ));
    }
}
