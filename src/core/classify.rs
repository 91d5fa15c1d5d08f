//! Classification resolver: CGPA to class of degree, and target parsing

use crate::core::arithmetic::CGPA_EPSILON;
use crate::core::error::PredictError;
use crate::core::models::{ClassTier, ThresholdTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolve `cgpa` to its tier.
///
/// Scans tiers from the top and returns the first whose minimum is at or
/// below `cgpa`. Boundaries are closed on the minimum, so 3.60 is First
/// Class under the standard table and 3.59 is not. Values below every
/// minimum fall into the lowest tier.
#[must_use]
pub fn classify(cgpa: f64, table: &ThresholdTable) -> &ClassTier {
    table
        .tiers()
        .iter()
        .find(|tier| tier.min_cgpa <= cgpa + CGPA_EPSILON)
        .unwrap_or_else(|| table.bottom())
}

/// What the caller is aiming for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A named tier from the threshold table
    Class(String),
    /// An explicit final CGPA
    Cgpa(f64),
    /// No minimum; every combination counts
    AnyAttainable,
}

impl Target {
    /// Minimum final CGPA this target demands, or `None` for [`Target::AnyAttainable`].
    ///
    /// # Errors
    /// Returns an error for a tier name missing from `table` or a CGPA
    /// outside `[0, 4]`.
    pub fn threshold(&self, table: &ThresholdTable) -> Result<Option<f64>, PredictError> {
        match self {
            Self::Class(name) => table
                .find(name)
                .map(|tier| Some(tier.min_cgpa))
                .ok_or_else(|| PredictError::UnknownTarget {
                    target: name.clone(),
                }),
            Self::Cgpa(value) => {
                if (0.0..=crate::core::models::MAX_CGPA).contains(value) {
                    Ok(Some(*value))
                } else {
                    Err(PredictError::CgpaOutOfRange {
                        value: *value,
                        max: crate::core::models::MAX_CGPA,
                    })
                }
            }
            Self::AnyAttainable => Ok(None),
        }
    }

    /// Display name of the targeted tier, when the target names one
    #[must_use]
    pub fn class_name(&self, table: &ThresholdTable) -> Option<String> {
        match self {
            Self::Class(name) => table.find(name).map(|t| t.name.clone()),
            Self::Cgpa(value) => Some(classify(*value, table).name.clone()),
            Self::AnyAttainable => None,
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Target cannot be empty".to_string());
        }
        let normalized = trimmed.to_ascii_lowercase().replace(['-', '_'], " ");
        if matches!(normalized.as_str(), "any" | "any attainable") {
            return Ok(Self::AnyAttainable);
        }
        Ok(trimmed
            .parse::<f64>()
            .map_or_else(|_| Self::Class(trimmed.to_string()), Self::Cgpa))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "{name}"),
            Self::Cgpa(value) => write!(f, "{value:.2}"),
            Self::AnyAttainable => write!(f, "any attainable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_boundaries() {
        let table = ThresholdTable::standard();
        assert_eq!(classify(3.60, &table).name, "First Class");
        assert_eq!(classify(3.59, &table).name, "Second Class Upper");
        assert_eq!(classify(3.00, &table).name, "Second Class Upper");
        assert_eq!(classify(2.99, &table).name, "Second Class Lower");
        assert_eq!(classify(2.50, &table).name, "Second Class Lower");
        assert_eq!(classify(2.49, &table).name, "Third Class");
        assert_eq!(classify(2.00, &table).name, "Third Class");
        assert_eq!(classify(1.99, &table).name, "Pass");
        assert_eq!(classify(1.00, &table).name, "Pass");
        assert_eq!(classify(0.99, &table).name, "Fail");
        assert_eq!(classify(0.0, &table).name, "Fail");
        assert_eq!(classify(4.0, &table).name, "First Class");
    }

    #[test]
    fn test_rounded_boundaries() {
        let table = ThresholdTable::rounded();
        assert_eq!(classify(3.55, &table).name, "First Class");
        assert_eq!(classify(3.54, &table).name, "Second Class Upper");
        assert_eq!(classify(2.95, &table).name, "Second Class Upper");
        assert_eq!(classify(2.94, &table).name, "Second Class Lower");
        assert_eq!(classify(0.95, &table).name, "Pass");
        assert_eq!(classify(0.94, &table).name, "Fail");
    }

    #[test]
    fn test_computed_boundary_value() {
        // rounding noise just under a boundary still counts as reaching it
        let table = ThresholdTable::standard();
        assert_eq!(classify(3.60 - 1e-12, &table).name, "First Class");
        assert_eq!(classify(3.60 - 1e-6, &table).name, "Second Class Upper");
    }

    #[test]
    fn test_below_zero_falls_to_bottom() {
        let table = ThresholdTable::standard();
        assert_eq!(classify(-1.0, &table).key, "fail");
    }

    #[test]
    fn test_target_parse() {
        assert_eq!("any".parse::<Target>(), Ok(Target::AnyAttainable));
        assert_eq!("Any-Attainable".parse::<Target>(), Ok(Target::AnyAttainable));
        assert_eq!("3.25".parse::<Target>(), Ok(Target::Cgpa(3.25)));
        assert_eq!(
            "First Class".parse::<Target>(),
            Ok(Target::Class("First Class".to_string()))
        );
        assert!("  ".parse::<Target>().is_err());
    }

    #[test]
    fn test_target_threshold() {
        let table = ThresholdTable::standard();
        assert_eq!(
            Target::Class("second_upper".to_string()).threshold(&table),
            Ok(Some(3.0))
        );
        assert_eq!(Target::AnyAttainable.threshold(&table), Ok(None));
        assert_eq!(Target::Cgpa(2.2).threshold(&table), Ok(Some(2.2)));
        assert!(Target::Class("Distinction".to_string())
            .threshold(&table)
            .is_err());
        assert_eq!(
            Target::Cgpa(4.5).threshold(&table),
            Err(PredictError::CgpaOutOfRange {
                value: 4.5,
                max: 4.0
            })
        );
        assert!(matches!(
            Target::Cgpa(-0.5).threshold(&table),
            Err(PredictError::CgpaOutOfRange { .. })
        ));
    }

    #[test]
    fn test_target_class_name() {
        let table = ThresholdTable::standard();
        assert_eq!(
            Target::Class("first".to_string()).class_name(&table),
            Some("First Class".to_string())
        );
        assert_eq!(
            Target::Cgpa(2.2).class_name(&table),
            Some("Third Class".to_string())
        );
        assert_eq!(Target::AnyAttainable.class_name(&table), None);
    }
}
