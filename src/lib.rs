//! Library for `GradeTarget`
//!
//! CGPA calculator and "what-if" grade predictor. Given a student's current
//! standing and a target class of degree, finds the grade combinations on
//! the remaining courses that reach it.

pub mod core;
pub mod logger;

pub use crate::core::classify::{classify, Target};
pub use crate::core::config::Config;
pub use crate::core::error::{PredictError, ScaleError};
pub use crate::core::models::{
    AcademicState, ClassTier, Constraints, GradeScale, ThresholdTable, ThresholdVariant,
};
pub use crate::core::prediction::{
    PredictionOptions, PredictionOutcome, PredictionRequest, Predictor,
};
