//! Error types for grade scales, CGPA arithmetic and prediction requests.
//!
//! Only malformed input is an error. A target that cannot be reached, or a
//! search that finds nothing, is reported through
//! [`PredictionOutcome`](crate::core::prediction::PredictionOutcome) instead.

use thiserror::Error;

/// Caller-side validation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    /// Current or target CGPA outside the `[0, max]` range
    #[error("CGPA must be between 0 and {max:.2}, got {value}")]
    CgpaOutOfRange { value: f64, max: f64 },

    /// A credit total that is negative or not a number
    #[error("{field} must be a non-negative number, got {value}")]
    InvalidCredits { field: &'static str, value: f64 },

    /// Both completed and remaining credits are zero
    #[error("Please enter some credits completed or remaining")]
    NoCredits,

    /// Credits per remaining course must be positive
    #[error("Credits per course must be greater than 0, got {value}")]
    InvalidCreditsPerCourse { value: f64 },

    /// Remaining credits do not cover a single course
    #[error("Remaining credits ({remaining}) are fewer than one course of {per_course} credits")]
    NoRemainingCourses { remaining: f64, per_course: f64 },

    /// Credit hours of a single course outside `(0, max]`
    #[error("Credit hours must be greater than 0 and at most {max} for course: {course}")]
    CourseCreditsOutOfRange { course: String, value: f64, max: f64 },

    /// Letter grade not present in the grade scale
    #[error("Invalid grade '{grade}'")]
    UnknownGrade { grade: String },

    /// Target class name not present in the threshold table
    #[error("Unknown target class '{target}'")]
    UnknownTarget { target: String },

    /// Exhaustive search requested for too many courses
    #[error("{courses} remaining courses exceed the exhaustive search limit of {limit}; use sampling instead")]
    TooManyCourses { courses: usize, limit: usize },

    /// Remaining credits split into more courses than any search may cover
    #[error("{courses} remaining courses exceed the limit of {limit}; check the remaining credits and credits per course")]
    CourseLimitExceeded { courses: usize, limit: usize },

    /// Constraints exclude every grade in the scale
    #[error("Every grade has been excluded; nothing left to assign")]
    NoGradesAvailable,

    /// A constraint that cannot be parsed or applied
    #[error("Invalid constraint: {message}")]
    InvalidConstraint { message: String },

    /// Requested result count of zero
    #[error("Result count must be at least 1")]
    InvalidResultCount,

    /// One or more transcript rows failed validation
    #[error("{}", .0.join("; "))]
    Transcript(Vec<String>),
}

/// Invalid grade scale or threshold table definitions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaleError {
    /// Scale without grades
    #[error("Grade scale must contain at least one grade")]
    EmptyScale,

    /// Letter listed twice
    #[error("Duplicate grade letter '{0}'")]
    DuplicateLetter(String),

    /// Negative, NaN or infinite grade points
    #[error("Grade '{letter}' has invalid point value {points}")]
    InvalidPoints { letter: String, points: f64 },

    /// Points increase going down the scale
    #[error("Grade '{letter}' ({points}) is worth more than the grade listed before it")]
    NotDescending { letter: String, points: f64 },

    /// Table without tiers
    #[error("Threshold table must contain at least one tier")]
    EmptyTable,

    /// Tier minimums not strictly descending
    #[error("Tier '{name}' minimum {min} must be below the tier listed before it")]
    TierOrder { name: String, min: f64 },

    /// Lowest tier does not start at zero, leaving a gap
    #[error("Lowest tier '{name}' must start at 0.0, got {min}")]
    TierGap { name: String, min: f64 },
}
