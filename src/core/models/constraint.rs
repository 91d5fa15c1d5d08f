//! Search constraints over grade assignments

use crate::core::error::PredictError;
use crate::core::models::GradeScale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caller-supplied restrictions, expressed with letter grades.
///
/// Constraints are applied while generating combinations and are never
/// relaxed to produce more results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum number of courses that may receive each listed grade
    #[serde(default)]
    pub max_occurrences: BTreeMap<String, usize>,
    /// Grades that may not be assigned at all
    #[serde(default)]
    pub excluded_grades: Vec<String>,
    /// Grades that may not fill every remaining course
    #[serde(default)]
    pub excluded_uniform: Vec<String>,
    /// Forbid the combination made entirely of the scale's top grade
    #[serde(default)]
    pub exclude_uniform_top_grade: bool,
}

impl Constraints {
    /// No restrictions
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `letter` on at most `count` courses
    #[must_use]
    pub fn max_occurrences_of(mut self, letter: &str, count: usize) -> Self {
        self.max_occurrences.insert(letter.to_string(), count);
        self
    }

    /// Never assign `letter`
    #[must_use]
    pub fn exclude_grade(mut self, letter: &str) -> Self {
        self.excluded_grades.push(letter.to_string());
        self
    }

    /// Reject the combination where every course gets `letter`
    #[must_use]
    pub fn exclude_uniform(mut self, letter: &str) -> Self {
        self.excluded_uniform.push(letter.to_string());
        self
    }

    /// Reject the all-top-grade combination
    #[must_use]
    pub const fn without_uniform_top_grade(mut self) -> Self {
        self.exclude_uniform_top_grade = true;
        self
    }

    /// Parse a `LETTER=COUNT` cap such as `A=3`.
    ///
    /// # Errors
    /// Returns an error if the text has no `=` or the count is not a
    /// non-negative integer.
    pub fn parse_cap(text: &str) -> Result<(String, usize), PredictError> {
        let (letter, count) = text.split_once('=').ok_or_else(|| PredictError::InvalidConstraint {
            message: format!("expected LETTER=COUNT, got '{text}'"),
        })?;
        let count = count
            .trim()
            .parse::<usize>()
            .map_err(|_| PredictError::InvalidConstraint {
                message: format!("invalid count in '{text}'"),
            })?;
        Ok((letter.trim().to_string(), count))
    }

    /// Resolve letters against `scale`.
    ///
    /// # Errors
    /// Returns [`PredictError::UnknownGrade`] for letters missing from the
    /// scale and [`PredictError::NoGradesAvailable`] when every grade is excluded.
    pub fn resolve(&self, scale: &GradeScale) -> Result<GradeRules, PredictError> {
        let lookup = |letter: &str| {
            scale.index_of(letter).ok_or_else(|| PredictError::UnknownGrade {
                grade: letter.to_string(),
            })
        };

        let mut rules = GradeRules::unrestricted(scale.len());
        for letter in &self.excluded_grades {
            rules.allowed[lookup(letter)?] = false;
        }
        for (letter, &count) in &self.max_occurrences {
            let index = lookup(letter)?;
            rules.caps[index] = rules.caps[index].min(count);
        }
        for letter in &self.excluded_uniform {
            rules.no_uniform[lookup(letter)?] = true;
        }
        if self.exclude_uniform_top_grade {
            rules.no_uniform[0] = true;
        }

        if rules.allowed_indices().next().is_none() {
            return Err(PredictError::NoGradesAvailable);
        }
        Ok(rules)
    }
}

/// Constraints resolved to grade-scale indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRules {
    allowed: Vec<bool>,
    caps: Vec<usize>,
    no_uniform: Vec<bool>,
}

impl GradeRules {
    /// Rules that accept every assignment over a scale of `grades` grades
    #[must_use]
    pub fn unrestricted(grades: usize) -> Self {
        Self {
            allowed: vec![true; grades],
            caps: vec![usize::MAX; grades],
            no_uniform: vec![false; grades],
        }
    }

    /// Whether the grade at `index` may be assigned
    #[must_use]
    pub fn allows(&self, index: usize) -> bool {
        self.allowed[index] && self.caps[index] > 0
    }

    /// Maximum number of courses that may receive the grade at `index`
    #[must_use]
    pub fn cap(&self, index: usize) -> usize {
        self.caps[index]
    }

    /// Indices of grades that may be assigned, highest grade first
    pub fn allowed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.allowed.len()).filter(|&i| self.allows(i))
    }

    /// Check a complete assignment given as per-grade counts
    #[must_use]
    pub fn accepts(&self, counts: &[usize]) -> bool {
        let total: usize = counts.iter().sum();
        counts.iter().enumerate().all(|(index, &count)| {
            count == 0
                || (self.allows(index)
                    && count <= self.caps[index]
                    && !(self.no_uniform[index] && count == total))
        })
    }
}
