//! Transcript calculator: CGPA and standing from a list of graded courses

use crate::core::arithmetic::{self, CGPA_EPSILON, MAX_COURSE_CREDITS};
use crate::core::classify::classify;
use crate::core::error::PredictError;
use crate::core::models::{ClassTier, GradeScale, ThresholdTable};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// A graded course as entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Course title or code
    pub name: String,
    /// Credit hours
    pub credits: f64,
    /// Letter grade as written
    pub grade: String,
}

impl CourseEntry {
    /// Create an entry
    pub fn new(name: impl Into<String>, credits: f64, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credits,
            grade: grade.into(),
        }
    }
}

/// Ordered list of graded courses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    courses: Vec<CourseEntry>,
}

/// Per-course figures in a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseResult {
    /// Course title or code
    pub name: String,
    /// Credit hours
    pub credits: f64,
    /// Letter grade as written
    pub grade: String,
    /// Points for the grade
    pub grade_point: f64,
    /// Credits times grade point
    pub course_grade_points: f64,
}

/// Aggregate statistics over a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptStats {
    /// Number of courses
    pub course_count: usize,
    /// Mean credit load per course
    pub average_credits: f64,
    /// Best grade earned (scale letter)
    pub highest_grade: String,
    /// Worst grade earned (scale letter)
    pub lowest_grade: String,
}

/// Advice on reaching the top tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetAdvice {
    /// What the advice is aiming at
    pub target: String,
    /// Human-readable advice
    pub message: String,
    /// CGPA points still needed (0 when already there)
    pub improvement: f64,
}

/// Everything the calculator reports for a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSummary {
    /// Credit-weighted grade point average
    pub cgpa: f64,
    /// Tier of [`Self::cgpa`]
    pub classification: ClassTier,
    /// Sum of credit hours
    pub total_credits: f64,
    /// Sum of credit-weighted grade points
    pub total_grade_points: f64,
    /// Per-course breakdown in input order
    pub courses: Vec<CourseResult>,
    /// Aggregate statistics
    pub statistics: TranscriptStats,
    /// Advice on reaching the top tier
    pub advice: TargetAdvice,
}

impl Transcript {
    /// An empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a course
    pub fn push(&mut self, course: CourseEntry) {
        self.courses.push(course);
    }

    /// Builder form of [`Transcript::push`]
    #[must_use]
    pub fn with_course(mut self, name: &str, credits: f64, grade: &str) -> Self {
        self.push(CourseEntry::new(name, credits, grade));
        self
    }

    /// Courses in input order
    #[must_use]
    pub fn courses(&self) -> &[CourseEntry] {
        &self.courses
    }

    /// Whether no courses were entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Parse CSV text with a `Course,Credits,Grade` header.
    ///
    /// Header names are matched case-insensitively and may appear in any
    /// order (`Name` and `Credit Hours` are accepted too). Blank lines are
    /// skipped. Every malformed row is reported, not only the first.
    ///
    /// # Errors
    /// Returns [`PredictError::Transcript`] listing each problem found.
    pub fn from_csv_str(content: &str) -> Result<Self, PredictError> {
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header_line)) = lines.next() else {
            return Err(PredictError::Transcript(vec!["Missing course data".to_string()]));
        };
        let headers = parse_csv_line(header_line);
        let column = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let (Some(name_col), Some(credits_col), Some(grade_col)) = (
            column(&["course", "name", "course name"]),
            column(&["credits", "credit hours", "credit"]),
            column(&["grade"]),
        ) else {
            return Err(PredictError::Transcript(vec![format!(
                "Header must name Course, Credits and Grade columns, got '{}'",
                header_line.trim()
            )]));
        };

        let mut transcript = Self::new();
        let mut errors = Vec::new();
        for (line_no, line) in lines {
            let fields = parse_csv_line(line);
            let field = |idx: usize| fields.get(idx).map_or("", String::as_str);
            let name = field(name_col);
            let credits_text = field(credits_col);
            match credits_text.parse::<f64>() {
                Ok(credits) => transcript.push(CourseEntry::new(name, credits, field(grade_col))),
                Err(_) => errors.push(format!(
                    "Line {}: invalid credit hours '{credits_text}' for course: {name}",
                    line_no + 1
                )),
            }
        }

        if errors.is_empty() {
            Ok(transcript)
        } else {
            Err(PredictError::Transcript(errors))
        }
    }

    /// Read and parse a CSV transcript file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or any row is malformed.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_csv_str(&content)?)
    }

    /// Compute the CGPA, standing and statistics.
    ///
    /// # Errors
    /// Returns [`PredictError::Transcript`] listing every course with an
    /// empty name, credits outside `(0, 6]` or a grade missing from `scale`,
    /// or noting that the transcript is empty.
    pub fn summarize(
        &self,
        scale: &GradeScale,
        table: &ThresholdTable,
    ) -> Result<TranscriptSummary, PredictError> {
        if self.courses.is_empty() {
            return Err(PredictError::Transcript(vec!["Missing course data".to_string()]));
        }

        let mut errors = Vec::new();
        let mut results = Vec::with_capacity(self.courses.len());
        let mut indices = Vec::with_capacity(self.courses.len());
        for (position, course) in self.courses.iter().enumerate() {
            let name = course.name.trim();
            if name.is_empty() {
                errors.push(format!(
                    "Course name cannot be empty for course {}",
                    position + 1
                ));
                continue;
            }
            if !course.credits.is_finite()
                || course.credits <= 0.0
                || course.credits > MAX_COURSE_CREDITS
            {
                errors.push(format!(
                    "Credit hours must be greater than 0 and at most {MAX_COURSE_CREDITS} for course: {name}"
                ));
                continue;
            }
            let Some(index) = scale.index_of(&course.grade) else {
                errors.push(format!("Invalid grade '{}' for course: {name}", course.grade.trim()));
                continue;
            };

            let grade_point = scale.points_at(index);
            indices.push(index);
            results.push(CourseResult {
                name: name.to_string(),
                credits: course.credits,
                grade: course.grade.trim().to_string(),
                grade_point,
                course_grade_points: course.credits * grade_point,
            });
        }
        if !errors.is_empty() {
            return Err(PredictError::Transcript(errors));
        }

        let pairs: Vec<(f64, &str)> = results
            .iter()
            .map(|r| (r.credits, r.grade.as_str()))
            .collect();
        let cgpa = arithmetic::weighted_average(&pairs, scale)?;
        let total_credits: f64 = results.iter().map(|r| r.credits).sum();
        let total_grade_points: f64 = results.iter().map(|r| r.course_grade_points).sum();

        let best = indices.iter().min().copied().unwrap_or_default();
        let worst = indices.iter().max().copied().unwrap_or_default();
        #[allow(clippy::cast_precision_loss)]
        let statistics = TranscriptStats {
            course_count: results.len(),
            average_credits: total_credits / results.len() as f64,
            highest_grade: scale.letter_at(best).to_string(),
            lowest_grade: scale.letter_at(worst).to_string(),
        };

        crate::debug!(
            "Transcript of {} courses: {total_credits} credits, CGPA {cgpa:.3}",
            results.len()
        );

        Ok(TranscriptSummary {
            cgpa,
            classification: classify(cgpa, table).clone(),
            total_credits,
            total_grade_points,
            courses: results,
            statistics,
            advice: target_advice(cgpa, scale, table),
        })
    }
}

/// Advice relative to the top tier of `table`
#[must_use]
pub fn target_advice(cgpa: f64, scale: &GradeScale, table: &ThresholdTable) -> TargetAdvice {
    let top = table.top();
    if cgpa + CGPA_EPSILON < top.min_cgpa {
        let improvement = top.min_cgpa - cgpa;
        TargetAdvice {
            target: top.name.clone(),
            message: format!(
                "To achieve {} ({:.2}+ CGPA), you need to improve your CGPA by {improvement:.2} points. Focus on getting higher grades in upcoming courses!",
                top.name, top.min_cgpa
            ),
            improvement,
        }
    } else if cgpa + CGPA_EPSILON < scale.max_points() {
        TargetAdvice {
            target: format!("{} Maintenance", top.name),
            message: format!(
                "Congratulations! You're already in {} range. Keep up the excellent work to maintain or improve your position!",
                top.name
            ),
            improvement: 0.0,
        }
    } else {
        TargetAdvice {
            target: "Perfect Score".to_string(),
            message: "Perfect! You've achieved the maximum CGPA. Outstanding academic excellence!"
                .to_string(),
            improvement: 0.0,
        }
    }
}

/// Split a CSV line into trimmed fields
fn parse_csv_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .map(std::string::ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarize(transcript: &Transcript) -> Result<TranscriptSummary, PredictError> {
        transcript.summarize(&GradeScale::university(), &ThresholdTable::standard())
    }

    #[test]
    fn test_summary_figures() {
        let transcript = Transcript::new()
            .with_course("Calculus", 3.0, "A")
            .with_course("Physics", 4.0, "B")
            .with_course("Writing", 2.0, "C+");
        let summary = summarize(&transcript).expect("valid transcript");

        let expected = (12.0 + 12.0 + 5.0) / 9.0;
        assert!((summary.cgpa - expected).abs() < 1e-12);
        assert!((summary.total_credits - 9.0).abs() < f64::EPSILON);
        assert!((summary.total_grade_points - 29.0).abs() < 1e-12);
        assert_eq!(summary.classification.name, "Second Class Upper");
        assert_eq!(summary.statistics.course_count, 3);
        assert_eq!(summary.statistics.highest_grade, "A");
        assert_eq!(summary.statistics.lowest_grade, "C+");
        assert!((summary.courses[1].course_grade_points - 12.0).abs() < 1e-12);
        assert_eq!(summary.advice.target, "First Class");
    }

    #[test]
    fn test_all_errors_collected() {
        let transcript = Transcript::new()
            .with_course("", 3.0, "A")
            .with_course("Lab", 0.0, "B")
            .with_course("Seminar", 3.0, "Q")
            .with_course("Thesis", 6.0, "F");
        let Err(PredictError::Transcript(errors)) = summarize(&transcript) else {
            panic!("expected transcript errors");
        };
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("course 1"));
        assert!(errors[1].contains("Lab"));
        assert!(errors[2].contains("'Q'"));
    }

    #[test]
    fn test_fail_alias_accepted() {
        let transcript = Transcript::new().with_course("Thesis", 3.0, "F");
        let summary = summarize(&transcript).expect("valid transcript");
        assert!(summary.cgpa.abs() < f64::EPSILON);
        assert_eq!(summary.classification.key, "fail");
        assert_eq!(summary.statistics.lowest_grade, "E");
    }

    #[test]
    fn test_empty_transcript_rejected() {
        assert!(matches!(
            summarize(&Transcript::new()),
            Err(PredictError::Transcript(_))
        ));
    }

    #[test]
    fn test_advice_levels() {
        let scale = GradeScale::university();
        let table = ThresholdTable::standard();
        let below = target_advice(3.1, &scale, &table);
        assert!((below.improvement - 0.5).abs() < 1e-9);
        assert!(below.message.contains("0.50"));
        assert_eq!(target_advice(3.7, &scale, &table).target, "First Class Maintenance");
        assert_eq!(target_advice(4.0, &scale, &table).target, "Perfect Score");
        assert!(target_advice(3.6, &scale, &table).improvement.abs() < f64::EPSILON);
    }

    #[test]
    fn test_csv_parsing() {
        let csv = "Grade, Credits, Course\n\nA, 3, Calculus\nB+,4,Physics\n";
        let transcript = Transcript::from_csv_str(csv).expect("valid csv");
        assert_eq!(transcript.courses().len(), 2);
        assert_eq!(transcript.courses()[1], CourseEntry::new("Physics", 4.0, "B+"));
    }

    #[test]
    fn test_csv_bad_rows_reported() {
        let csv = "Course,Credits,Grade\nCalculus,three,A\nPhysics,4,B\nLab,,C\n";
        let Err(PredictError::Transcript(errors)) = Transcript::from_csv_str(csv) else {
            panic!("expected parse errors");
        };
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Line 2"));
        assert!(errors[1].contains("Lab"));
    }

    #[test]
    fn test_csv_missing_header_columns() {
        assert!(Transcript::from_csv_str("Course,Points\nX,3\n").is_err());
        assert!(Transcript::from_csv_str("\n\n").is_err());
    }
}
