//! Class-of-degree tiers and threshold tables

use crate::core::error::ScaleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display metadata attached to a tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierMeta {
    /// Badge color (CSS hex)
    pub color: String,
    /// Icon class name
    pub icon: String,
    /// One-line description of the standing
    pub description: String,
}

/// A named classification band over the CGPA range.
///
/// A tier covers `[min_cgpa, max_cgpa)`; the top tier has no maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTier {
    /// Short identifier (e.g., `second_upper`)
    pub key: String,
    /// Display name (e.g., "Second Class Upper")
    pub name: String,
    /// Inclusive lower bound
    pub min_cgpa: f64,
    /// Exclusive upper bound: the next tier's minimum
    pub max_cgpa: Option<f64>,
    /// Display metadata
    pub meta: TierMeta,
}

/// Which boundary convention a threshold table follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdVariant {
    /// First Class from 3.60
    #[default]
    Standard,
    /// Boundaries lowered by 0.05 (First Class from 3.55)
    Rounded,
}

impl FromStr for ThresholdVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "std" => Ok(Self::Standard),
            "rounded" | "adjusted" => Ok(Self::Rounded),
            _ => Err(format!("Unknown threshold table: '{s}'")),
        }
    }
}

impl fmt::Display for ThresholdVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Rounded => write!(f, "rounded"),
        }
    }
}

/// `(key, name, color, icon, description)` for each tier, highest first
const TIER_DEFINITIONS: [(&str, &str, &str, &str, &str); 6] = [
    (
        "first",
        "First Class",
        "#ffd700",
        "fas fa-crown",
        "Outstanding academic achievement!",
    ),
    (
        "second_upper",
        "Second Class Upper",
        "#00c851",
        "fas fa-medal",
        "Excellent academic performance!",
    ),
    (
        "second_lower",
        "Second Class Lower",
        "#39c0ed",
        "fas fa-award",
        "Good academic performance!",
    ),
    (
        "third",
        "Third Class",
        "#ffbb33",
        "fas fa-certificate",
        "Satisfactory academic performance.",
    ),
    (
        "pass",
        "Pass",
        "#ff8800",
        "fas fa-check",
        "Minimum passing requirement met.",
    ),
    (
        "fail",
        "Fail",
        "#dc3545",
        "fas fa-times",
        "Below minimum passing requirement.",
    ),
];

const STANDARD_MINIMUMS: [f64; 6] = [3.60, 3.00, 2.50, 2.00, 1.00, 0.00];
const ROUNDED_MINIMUMS: [f64; 6] = [3.55, 2.95, 2.45, 1.95, 0.95, 0.00];

/// Ordered set of tiers partitioning the CGPA range, highest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    tiers: Vec<ClassTier>,
}

impl ThresholdTable {
    /// Build a table from tiers listed highest first.
    ///
    /// Each tier's `max_cgpa` is recomputed from its neighbor so the
    /// tiers cover the range without gaps or overlaps.
    ///
    /// # Errors
    /// Returns an error if the list is empty, minimums are not strictly
    /// descending, or the lowest tier does not start at 0.0.
    pub fn new(mut tiers: Vec<ClassTier>) -> Result<Self, ScaleError> {
        let Some(lowest) = tiers.last() else {
            return Err(ScaleError::EmptyTable);
        };
        if lowest.min_cgpa.abs() > f64::EPSILON {
            return Err(ScaleError::TierGap {
                name: lowest.name.clone(),
                min: lowest.min_cgpa,
            });
        }
        for pair in tiers.windows(2) {
            if pair[1].min_cgpa >= pair[0].min_cgpa {
                return Err(ScaleError::TierOrder {
                    name: pair[1].name.clone(),
                    min: pair[1].min_cgpa,
                });
            }
        }

        let mut upper = None;
        for tier in &mut tiers {
            tier.max_cgpa = upper;
            upper = Some(tier.min_cgpa);
        }
        Ok(Self { tiers })
    }

    /// Table for the requested boundary convention
    #[must_use]
    pub fn for_variant(variant: ThresholdVariant) -> Self {
        let minimums = match variant {
            ThresholdVariant::Standard => STANDARD_MINIMUMS,
            ThresholdVariant::Rounded => ROUNDED_MINIMUMS,
        };
        let mut upper = None;
        let tiers = TIER_DEFINITIONS
            .iter()
            .zip(minimums)
            .map(|(&(key, name, color, icon, description), min_cgpa)| {
                let tier = ClassTier {
                    key: key.to_string(),
                    name: name.to_string(),
                    min_cgpa,
                    max_cgpa: upper,
                    meta: TierMeta {
                        color: color.to_string(),
                        icon: icon.to_string(),
                        description: description.to_string(),
                    },
                };
                upper = Some(min_cgpa);
                tier
            })
            .collect();
        Self { tiers }
    }

    /// The standard table (First Class from 3.60)
    #[must_use]
    pub fn standard() -> Self {
        Self::for_variant(ThresholdVariant::Standard)
    }

    /// The rounded table (First Class from 3.55)
    #[must_use]
    pub fn rounded() -> Self {
        Self::for_variant(ThresholdVariant::Rounded)
    }

    /// Tiers, highest first
    #[must_use]
    pub fn tiers(&self) -> &[ClassTier] {
        &self.tiers
    }

    /// The highest tier
    ///
    /// # Panics
    /// Never for a table built through [`ThresholdTable::new`] or the presets.
    #[must_use]
    pub fn top(&self) -> &ClassTier {
        &self.tiers[0]
    }

    /// The lowest tier
    #[must_use]
    pub fn bottom(&self) -> &ClassTier {
        &self.tiers[self.tiers.len() - 1]
    }

    /// Find a tier by display name or key (case-insensitive)
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ClassTier> {
        let wanted = name.trim();
        self.tiers
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(wanted) || t.key.eq_ignore_ascii_case(wanted))
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_partitions_range() {
        let table = ThresholdTable::standard();
        let tiers = table.tiers();
        assert_eq!(tiers.len(), 6);
        assert!(tiers[0].max_cgpa.is_none());
        for pair in tiers.windows(2) {
            assert_eq!(pair[1].max_cgpa, Some(pair[0].min_cgpa));
        }
        assert!(table.bottom().min_cgpa.abs() < f64::EPSILON);
    }

    #[test]
    fn test_rounded_top_threshold() {
        assert!((ThresholdTable::rounded().top().min_cgpa - 3.55).abs() < 1e-12);
        assert!((ThresholdTable::standard().top().min_cgpa - 3.60).abs() < 1e-12);
    }

    #[test]
    fn test_find_by_name_or_key() {
        let table = ThresholdTable::standard();
        assert_eq!(
            table.find("second class upper").map(|t| t.key.as_str()),
            Some("second_upper")
        );
        assert_eq!(
            table.find("FIRST").map(|t| t.name.as_str()),
            Some("First Class")
        );
        assert!(table.find("Distinction").is_none());
    }

    #[test]
    fn test_variant_parse_and_display() {
        assert_eq!("Rounded".parse::<ThresholdVariant>(), Ok(ThresholdVariant::Rounded));
        assert_eq!("std".parse::<ThresholdVariant>(), Ok(ThresholdVariant::Standard));
        assert!("weird".parse::<ThresholdVariant>().is_err());
        assert_eq!(ThresholdVariant::Rounded.to_string(), "rounded");
    }

    #[test]
    fn test_custom_table_validation() {
        let meta = TierMeta {
            color: String::new(),
            icon: String::new(),
            description: String::new(),
        };
        let tier = |name: &str, min: f64| ClassTier {
            key: name.to_lowercase(),
            name: name.to_string(),
            min_cgpa: min,
            max_cgpa: None,
            meta: meta.clone(),
        };

        let table = ThresholdTable::new(vec![tier("Honours", 3.0), tier("Ordinary", 0.0)])
            .expect("valid table");
        assert_eq!(table.bottom().max_cgpa, Some(3.0));

        assert_eq!(ThresholdTable::new(Vec::new()), Err(ScaleError::EmptyTable));
        assert!(matches!(
            ThresholdTable::new(vec![tier("Honours", 3.0), tier("Ordinary", 1.0)]),
            Err(ScaleError::TierGap { .. })
        ));
        assert!(matches!(
            ThresholdTable::new(vec![tier("A", 2.0), tier("B", 2.0), tier("C", 0.0)]),
            Err(ScaleError::TierOrder { .. })
        ));
    }
}
