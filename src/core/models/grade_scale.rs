//! Grade scale model

use crate::core::error::ScaleError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default university scale, highest grade first.
const UNIVERSITY_GRADES: [(&str, f64); 7] = [
    ("A", 4.0),
    ("B+", 3.5),
    ("B", 3.0),
    ("C+", 2.5),
    ("C", 2.0),
    ("D", 1.0),
    ("E", 0.0),
];

/// A letter grade and the grade points it is worth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Letter as written on a transcript (e.g., "B+")
    pub letter: String,
    /// Grade points (e.g., 3.5)
    pub points: f64,
}

/// Ordered mapping from letter grade to grade points, highest first.
///
/// Grades are addressed by index; a lower index is never worth fewer
/// points than a higher one. Aliases resolve extra letters (such as `F`)
/// to an existing grade for lookups without adding a distinct grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    grades: Vec<Grade>,
    aliases: Vec<(String, usize)>,
}

impl GradeScale {
    /// Build a validated scale from `(letter, points)` pairs listed highest first.
    ///
    /// # Errors
    /// Returns an error if the list is empty, a letter repeats, a point value
    /// is negative or not finite, or points increase down the list.
    pub fn new<S: Into<String>>(
        grades: impl IntoIterator<Item = (S, f64)>,
    ) -> Result<Self, ScaleError> {
        let grades: Vec<Grade> = grades
            .into_iter()
            .map(|(letter, points)| Grade {
                letter: letter.into(),
                points,
            })
            .collect();

        if grades.is_empty() {
            return Err(ScaleError::EmptyScale);
        }

        let mut seen = HashSet::new();
        let mut previous = f64::INFINITY;
        for grade in &grades {
            if !seen.insert(grade.letter.to_ascii_uppercase()) {
                return Err(ScaleError::DuplicateLetter(grade.letter.clone()));
            }
            if !grade.points.is_finite() || grade.points < 0.0 {
                return Err(ScaleError::InvalidPoints {
                    letter: grade.letter.clone(),
                    points: grade.points,
                });
            }
            if grade.points > previous {
                return Err(ScaleError::NotDescending {
                    letter: grade.letter.clone(),
                    points: grade.points,
                });
            }
            previous = grade.points;
        }

        Ok(Self {
            grades,
            aliases: Vec::new(),
        })
    }

    /// The university scale: A, B+, B, C+, C, D, E with `F` as an alias of `E`.
    #[must_use]
    pub fn university() -> Self {
        let grades: Vec<Grade> = UNIVERSITY_GRADES
            .iter()
            .map(|&(letter, points)| Grade {
                letter: letter.to_string(),
                points,
            })
            .collect();
        let fail_index = grades.len() - 1;
        Self {
            grades,
            aliases: vec![("F".to_string(), fail_index)],
        }
    }

    /// All grades, highest first
    #[must_use]
    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Number of distinct grades (aliases excluded)
    #[must_use]
    pub fn len(&self) -> usize {
        self.grades.len()
    }

    /// Whether the scale has no grades (never true for a validated scale)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// Grade at `index`
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn grade(&self, index: usize) -> &Grade {
        &self.grades[index]
    }

    /// Points of the grade at `index`
    #[must_use]
    pub fn points_at(&self, index: usize) -> f64 {
        self.grades[index].points
    }

    /// Letter of the grade at `index`
    #[must_use]
    pub fn letter_at(&self, index: usize) -> &str {
        &self.grades[index].letter
    }

    /// Resolve a letter or alias (case-insensitive) to its index
    #[must_use]
    pub fn index_of(&self, letter: &str) -> Option<usize> {
        let letter = letter.trim();
        self.grades
            .iter()
            .position(|g| g.letter.eq_ignore_ascii_case(letter))
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(letter))
                    .map(|&(_, index)| index)
            })
    }

    /// Grade points for a letter or alias
    #[must_use]
    pub fn points(&self, letter: &str) -> Option<f64> {
        self.index_of(letter).map(|i| self.grades[i].points)
    }

    /// Highest grade points in the scale
    #[must_use]
    pub fn max_points(&self) -> f64 {
        self.grades.first().map_or(0.0, |g| g.points)
    }

    /// Lowest grade points in the scale
    #[must_use]
    pub fn min_points(&self) -> f64 {
        self.grades.last().map_or(0.0, |g| g.points)
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self::university()
    }
}
