//! Data models for `GradeTarget`

pub mod combination;
pub mod constraint;
pub mod grade_scale;
pub mod state;
pub mod tier;

pub use combination::Combination;
pub use constraint::{Constraints, GradeRules};
pub use grade_scale::{Grade, GradeScale};
pub use state::{AcademicState, MAX_CGPA};
pub use tier::{ClassTier, ThresholdTable, ThresholdVariant, TierMeta};
