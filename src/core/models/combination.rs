//! Grade combination model

use crate::core::models::GradeScale;

/// One candidate assignment of grades to the remaining courses.
///
/// Grades are stored as scale indices in canonical order (non-decreasing
/// index, so non-increasing points). Two combinations are equal exactly
/// when they hold the same multiset of grades.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination {
    grades: Vec<usize>,
    point_sum: f64,
}

impl Combination {
    /// Build a combination from grade indices in any order
    #[must_use]
    pub fn from_indices(mut grades: Vec<usize>, scale: &GradeScale) -> Self {
        grades.sort_unstable();
        let point_sum = grades.iter().map(|&i| scale.points_at(i)).sum();
        Self { grades, point_sum }
    }

    /// Build a combination from indices already in canonical order
    pub(crate) const fn from_canonical(grades: Vec<usize>, point_sum: f64) -> Self {
        Self { grades, point_sum }
    }

    /// Grade indices in canonical order
    #[must_use]
    pub fn grades(&self) -> &[usize] {
        &self.grades
    }

    /// Number of courses covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.grades.len()
    }

    /// Whether the combination covers no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// Sum of grade points across courses (per course, not credit weighted)
    #[must_use]
    pub const fn point_sum(&self) -> f64 {
        self.point_sum
    }

    /// Credit-weighted grade points when every course carries `credits_per_course`
    #[must_use]
    pub fn total_points(&self, credits_per_course: f64) -> f64 {
        self.point_sum * credits_per_course
    }

    /// Average grade point over the combination's courses
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_gpa(&self) -> f64 {
        if self.grades.is_empty() {
            0.0
        } else {
            self.point_sum / self.grades.len() as f64
        }
    }

    /// How many courses received the grade at `index`
    #[must_use]
    pub fn count_of(&self, index: usize) -> usize {
        self.grades.iter().filter(|&&g| g == index).count()
    }

    /// Per-grade counts over a scale with `grades` entries
    #[must_use]
    pub fn histogram(&self, grades: usize) -> Vec<usize> {
        let mut counts = vec![0; grades];
        for &g in &self.grades {
            counts[g] += 1;
        }
        counts
    }

    /// Letters in canonical order
    #[must_use]
    pub fn letters<'a>(&self, scale: &'a GradeScale) -> Vec<&'a str> {
        self.grades.iter().map(|&i| scale.letter_at(i)).collect()
    }
}
