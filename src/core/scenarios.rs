//! Quick answers that need no search: the required-average verdict and the
//! uniform-grade scenario table.

use crate::core::arithmetic::{self, CGPA_EPSILON};
use crate::core::classify::classify;
use crate::core::models::{AcademicState, GradeScale, ThresholdTable};
use serde::Serialize;
use std::fmt;

/// What a target CGPA asks of the remaining credits
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// No credits remain and the target is met
    AlreadyMet {
        /// CGPA at graduation
        final_cgpa: f64,
    },
    /// No credits remain and the target was missed
    Missed {
        /// CGPA at graduation
        final_cgpa: f64,
    },
    /// Even the lowest grade everywhere reaches the target
    AnyGrades {
        /// Average the target demands (at or below the lowest grade)
        required_average: f64,
    },
    /// The top grade everywhere still falls short
    Impossible {
        /// Average the target demands
        required_average: f64,
        /// Best grade point available
        max_points: f64,
    },
    /// Reachable with at least this average
    NeedsAverage {
        /// Average the target demands
        required_average: f64,
    },
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyMet { final_cgpa } => {
                write!(f, "Target already met with a final CGPA of {final_cgpa:.2}")
            }
            Self::Missed { final_cgpa } => write!(
                f,
                "No credits remain; the final CGPA of {final_cgpa:.2} is below the target"
            ),
            Self::AnyGrades { .. } => write!(f, "Any grades on the remaining courses reach the target"),
            Self::Impossible {
                required_average,
                max_points,
            } => write!(
                f,
                "Target is mathematically impossible: it needs an average of {required_average:.2} but the best grade is worth {max_points:.2}"
            ),
            Self::NeedsAverage { required_average } => write!(
                f,
                "You need an average of at least {required_average:.2} on the remaining courses"
            ),
        }
    }
}

/// Decide what reaching `target_cgpa` takes from `state`.
#[must_use]
pub fn verdict(state: &AcademicState, target_cgpa: f64, scale: &GradeScale) -> Verdict {
    let Some(required_average) = arithmetic::required_average(state, target_cgpa) else {
        let final_cgpa = state.current_cgpa;
        return if final_cgpa + CGPA_EPSILON >= target_cgpa {
            Verdict::AlreadyMet { final_cgpa }
        } else {
            Verdict::Missed { final_cgpa }
        };
    };

    if !arithmetic::is_reachable(required_average, scale) {
        Verdict::Impossible {
            required_average,
            max_points: scale.max_points(),
        }
    } else if required_average <= scale.min_points() + CGPA_EPSILON {
        Verdict::AnyGrades { required_average }
    } else {
        Verdict::NeedsAverage { required_average }
    }
}

/// Projection for one grade earned on every remaining course
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformScenario {
    /// 1-based position, best first
    pub rank: usize,
    /// Letter assumed on every remaining course
    pub letter: String,
    /// Its grade point
    pub average_on_remaining: f64,
    /// Final CGPA under that assumption
    pub projected_final_cgpa: f64,
    /// Class of the projection
    pub achievable_class: String,
}

/// One scenario per distinct grade point of `scale`, best first.
///
/// Grades sharing a point value produce a single row under the first letter.
#[must_use]
pub fn uniform_scenarios(
    state: &AcademicState,
    scale: &GradeScale,
    table: &ThresholdTable,
) -> Vec<UniformScenario> {
    let mut rows: Vec<UniformScenario> = Vec::with_capacity(scale.len());
    for grade in scale.grades() {
        if rows
            .last()
            .is_some_and(|r| (r.average_on_remaining - grade.points).abs() < CGPA_EPSILON)
        {
            continue;
        }
        let projected = arithmetic::project(state, grade.points);
        rows.push(UniformScenario {
            rank: 0,
            letter: grade.letter.clone(),
            average_on_remaining: grade.points,
            projected_final_cgpa: projected,
            achievable_class: classify(projected, table).name.clone(),
        });
    }

    rows.sort_by(|a, b| b.projected_final_cgpa.total_cmp(&a.projected_final_cgpa));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cgpa: f64, completed: f64, remaining: f64) -> AcademicState {
        AcademicState::new(cgpa, completed, remaining, 3.0).expect("valid state")
    }

    #[test]
    fn test_verdicts() {
        let scale = GradeScale::university();
        assert!(matches!(
            verdict(&state(3.0, 60.0, 30.0), 3.6, &scale),
            Verdict::Impossible { .. }
        ));
        assert!(matches!(
            verdict(&state(3.2, 60.0, 15.0), 2.0, &scale),
            Verdict::AnyGrades { .. }
        ));
        match verdict(&state(3.0, 60.0, 30.0), 3.2, &scale) {
            Verdict::NeedsAverage { required_average } => {
                assert!((required_average - 3.6).abs() < 1e-9);
            }
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[test]
    fn test_verdict_when_complete() {
        let scale = GradeScale::university();
        assert!(matches!(
            verdict(&state(3.6, 120.0, 0.0), 3.6, &scale),
            Verdict::AlreadyMet { .. }
        ));
        assert!(matches!(
            verdict(&state(2.9, 120.0, 0.0), 3.0, &scale),
            Verdict::Missed { .. }
        ));
    }

    #[test]
    fn test_verdict_messages() {
        let scale = GradeScale::university();
        let text = verdict(&state(3.0, 60.0, 30.0), 3.6, &scale).to_string();
        assert!(text.contains("4.80"));
        assert!(text.contains("impossible"));
    }

    #[test]
    fn test_uniform_scenarios() {
        let table = ThresholdTable::standard();
        let rows = uniform_scenarios(&state(3.0, 60.0, 30.0), &GradeScale::university(), &table);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].letter, "A");
        assert!((rows[0].projected_final_cgpa - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(rows[0].achievable_class, "Second Class Upper");
        assert_eq!(rows[6].letter, "E");
        assert!((rows[6].projected_final_cgpa - 2.0).abs() < 1e-12);
        assert_eq!(rows[6].achievable_class, "Third Class");
        assert!(rows
            .windows(2)
            .all(|w| w[0].projected_final_cgpa >= w[1].projected_final_cgpa));
    }

    #[test]
    fn test_uniform_scenarios_merge_equal_points() {
        let scale = GradeScale::new([("A", 4.0), ("A-", 4.0), ("B", 3.0)]).expect("valid scale");
        let rows = uniform_scenarios(&state(3.0, 30.0, 30.0), &scale, &ThresholdTable::standard());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].letter, "A");
    }
}
