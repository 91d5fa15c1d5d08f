//! Combination generator: searches the grade space for the remaining courses.
//!
//! Two strategies share one predicate. A combination is valid when it obeys
//! the [`GradeRules`] and its average grade point reaches the required
//! average. [`Backtracking`] enumerates every valid multiset exactly once;
//! [`MonteCarlo`] samples and makes no completeness promise.

pub mod backtrack;
pub mod sampling;

pub use backtrack::Backtracking;
pub use sampling::{MonteCarlo, SamplingOptions};

use crate::core::arithmetic::CGPA_EPSILON;
use crate::core::error::PredictError;
use crate::core::models::{Combination, GradeRules, GradeScale};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to search the grade space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exhaustive up to the course limit, sampling beyond it
    #[default]
    Auto,
    /// Backtracking with pruning; complete
    Exhaustive,
    /// Randomized sampling; approximate
    Sampling,
}

impl Strategy {
    /// Pick the concrete strategy for `courses` remaining courses.
    ///
    /// # Errors
    /// Returns [`PredictError::TooManyCourses`] when exhaustive search is
    /// requested explicitly above `exhaustive_limit`.
    pub fn resolve(self, courses: usize, exhaustive_limit: usize) -> Result<Self, PredictError> {
        match self {
            Self::Auto if courses <= exhaustive_limit => Ok(Self::Exhaustive),
            Self::Auto => {
                crate::info!(
                    "{courses} remaining courses exceed the exhaustive limit of {exhaustive_limit}; sampling instead"
                );
                Ok(Self::Sampling)
            }
            Self::Exhaustive if courses > exhaustive_limit => Err(PredictError::TooManyCourses {
                courses,
                limit: exhaustive_limit,
            }),
            other => Ok(other),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exhaustive" | "backtracking" => Ok(Self::Exhaustive),
            "sampling" | "random" | "monte-carlo" => Ok(Self::Sampling),
            _ => Err(format!("Unknown search strategy: '{s}'")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Exhaustive => write!(f, "exhaustive"),
            Self::Sampling => write!(f, "sampling"),
        }
    }
}

/// One search problem: assign grades to `courses` courses so the average
/// reaches `required_average` under `rules`.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    /// Grade scale to draw from
    pub scale: &'a GradeScale,
    /// Resolved constraints
    pub rules: &'a GradeRules,
    /// Number of remaining courses
    pub courses: usize,
    /// Minimum average grade point; `None` accepts every combination
    pub required_average: Option<f64>,
}

impl SearchRequest<'_> {
    /// Minimum point sum over all courses, with rounding slack applied
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn required_sum(&self) -> f64 {
        self.required_average
            .map_or(f64::NEG_INFINITY, |avg| avg * self.courses as f64 - CGPA_EPSILON)
    }

    /// Whether a complete assignment with these counts and point sum is valid
    pub(crate) fn accepts(&self, counts: &[usize], point_sum: f64) -> bool {
        point_sum >= self.required_sum() && self.rules.accepts(counts)
    }

    /// Whether the required average is at most the scale's top grade
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.required_average
            .map_or(true, |avg| crate::core::arithmetic::is_reachable(avg, self.scale))
    }
}

/// What a strategy produced
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    /// Valid combinations, one per multiset, in discovery order
    pub combinations: Vec<Combination>,
    /// Partial or complete assignments examined (prefixes or samples)
    pub explored: usize,
    /// Branches cut by the best-case bound, or samples rejected
    pub rejected: usize,
    /// Whether every valid multiset is guaranteed to be present
    pub complete: bool,
}

/// Result of running a search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The required average exceeds the best grade; no search ran
    Impossible {
        /// Average the target demands
        required_average: f64,
        /// Best grade point available
        max_points: f64,
    },
    /// The search ran (it may still have found nothing)
    Searched(SearchReport),
}

/// A strategy for producing valid combinations
pub trait GradeSearch {
    /// Strategy name used in logs and reports
    fn strategy(&self) -> Strategy;

    /// Produce valid combinations for a feasible request
    fn search(&self, request: &SearchRequest<'_>) -> SearchReport;
}

/// Check feasibility once, then hand the request to `searcher`.
pub fn run_search(request: &SearchRequest<'_>, searcher: &dyn GradeSearch) -> SearchOutcome {
    if !request.is_feasible() {
        let required_average = request.required_average.unwrap_or_default();
        crate::debug!(
            "Required average {required_average:.3} exceeds top grade {:.2}; skipping search",
            request.scale.max_points()
        );
        return SearchOutcome::Impossible {
            required_average,
            max_points: request.scale.max_points(),
        };
    }

    let report = searcher.search(request);
    crate::debug!(
        "{} search over {} courses: {} valid, {} explored, {} rejected",
        searcher.strategy(),
        request.courses,
        report.combinations.len(),
        report.explored,
        report.rejected
    );
    SearchOutcome::Searched(report)
}
