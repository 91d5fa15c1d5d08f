//! Prediction pipeline: feasibility check, search, ranking and result assembly.
//!
//! [`Predictor::predict`] always returns a well-formed answer. Malformed input
//! is a [`PredictError`]; every negative answer is a [`PredictionOutcome`]
//! variant.

use crate::core::arithmetic::{self, max_attainable_cgpa};
use crate::core::classify::{classify, Target};
use crate::core::error::PredictError;
use crate::core::generator::{
    run_search, Backtracking, GradeSearch, MonteCarlo, SamplingOptions, SearchOutcome,
    SearchReport, SearchRequest, Strategy,
};
use crate::core::models::{
    AcademicState, Combination, Constraints, GradeScale, ThresholdTable, ThresholdVariant,
};
use crate::core::ranking::{select, Selection, SelectionMode};
use serde::Serialize;

/// Default upper bound on returned combinations
pub const DEFAULT_RESULT_COUNT: usize = 5;

/// Default course count above which `auto` switches to sampling
pub const DEFAULT_MAX_EXHAUSTIVE_COURSES: usize = 15;

/// Default ceiling on remaining courses for any search
pub const DEFAULT_MAX_COURSES: usize = 200;

/// Sampling collects this many times the requested result count before stopping
const SAMPLE_RESULT_MULTIPLE: usize = 10;

/// Everything a caller supplies for one prediction
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    /// Current standing
    pub state: AcademicState,
    /// Class or CGPA to aim for
    pub target: Target,
    /// Restrictions on the grade assignments
    pub constraints: Constraints,
    /// Upper bound on returned combinations
    pub result_count: usize,
    /// Boundary convention for classification
    pub thresholds: ThresholdVariant,
}

impl PredictionRequest {
    /// A request with no constraints, default result count and standard thresholds
    #[must_use]
    pub fn new(state: AcademicState, target: Target) -> Self {
        Self {
            state,
            target,
            constraints: Constraints::default(),
            result_count: DEFAULT_RESULT_COUNT,
            thresholds: ThresholdVariant::Standard,
        }
    }

    /// Replace the constraints
    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Replace the result count
    #[must_use]
    pub const fn with_result_count(mut self, count: usize) -> Self {
        self.result_count = count;
        self
    }

    /// Replace the threshold table
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: ThresholdVariant) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Search behavior shared by every request a [`Predictor`] serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionOptions {
    /// Search strategy
    pub strategy: Strategy,
    /// Which slice of the ranked list to return
    pub selection: SelectionMode,
    /// Course count above which exhaustive search is not attempted
    pub max_exhaustive_courses: usize,
    /// Course count above which no search runs at all
    pub max_courses: usize,
    /// Number of draws for the sampling strategy
    pub sample_trials: usize,
    /// Seed for the sampling strategy; `None` for an OS seed
    pub sample_seed: Option<u64>,
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            selection: SelectionMode::Top,
            max_exhaustive_courses: DEFAULT_MAX_EXHAUSTIVE_COURSES,
            max_courses: DEFAULT_MAX_COURSES,
            sample_trials: crate::core::generator::sampling::DEFAULT_TRIALS,
            sample_seed: None,
        }
    }
}

/// Overview of the request, present in every outcome that ran a search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    /// CGPA earned so far
    pub current_cgpa: f64,
    /// Class of the current CGPA
    pub current_class: String,
    /// Credits already graded
    pub completed_credits: f64,
    /// Credits still to be taken
    pub remaining_credits: f64,
    /// Whole courses the remaining credits cover
    pub remaining_courses: usize,
    /// Final CGPA with the top grade in every remaining course
    pub max_attainable_cgpa: f64,
    /// Class of [`Self::max_attainable_cgpa`]
    pub max_attainable_class: String,
    /// Target as given
    pub target: String,
    /// Class the target corresponds to, if any
    pub target_class: Option<String>,
    /// Final CGPA the target demands, if any
    pub target_cgpa: Option<f64>,
    /// Average grade point the remaining courses need, if there is a minimum
    pub required_average: Option<f64>,
    /// Threshold table used
    pub thresholds: ThresholdVariant,
}

/// Occurrences of one letter within a combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeCount {
    /// Letter grade
    pub letter: String,
    /// How many remaining courses receive it
    pub count: usize,
}

/// One presented combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCombination {
    /// 1-based position in the presented list
    pub rank: usize,
    /// Letter histogram in scale order, zero counts omitted
    pub breakdown: Vec<GradeCount>,
    /// Mean grade point over the remaining courses
    pub average_gpa: f64,
    /// Credit-weighted grade points the combination earns
    pub total_points: f64,
    /// Final CGPA if this combination is achieved
    pub projected_final_cgpa: f64,
    /// Class of [`Self::projected_final_cgpa`]
    pub resulting_class: String,
}

impl RankedCombination {
    /// Breakdown rendered as `2×A, 1×B+`
    #[must_use]
    pub fn breakdown_label(&self) -> String {
        self.breakdown
            .iter()
            .map(|g| format!("{}×{}", g.count, g.letter))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Request overview
    pub summary: PredictionSummary,
    /// Selected combinations, best first
    pub combinations: Vec<RankedCombination>,
    /// Valid multisets found before selection
    pub total_found: usize,
    /// Strategy that ran
    pub strategy: Strategy,
    /// Whether every valid multiset was considered
    pub complete: bool,
}

/// Answer to a prediction request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    /// No credits remain; the final CGPA is already fixed
    ProgramComplete {
        /// Final CGPA
        final_cgpa: f64,
        /// Its class
        final_class: String,
        /// Human-readable statement
        message: String,
    },
    /// Even the top grade everywhere falls short
    TargetImpossible {
        /// Request overview
        summary: PredictionSummary,
        /// Average the target demands
        required_average: f64,
        /// Best grade point available
        max_points: f64,
    },
    /// The search ran but constraints left nothing
    NoCombinations {
        /// Request overview
        summary: PredictionSummary,
        /// Strategy that ran
        strategy: Strategy,
        /// Whether the search was complete
        complete: bool,
    },
    /// Combinations that reach the target
    Predicted(PredictionResult),
}

impl PredictionOutcome {
    /// Short machine-readable status
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::ProgramComplete { .. } => "program_complete",
            Self::TargetImpossible { .. } => "target_impossible",
            Self::NoCombinations { .. } => "no_combinations",
            Self::Predicted(_) => "predicted",
        }
    }

    /// Request overview, when a search was set up
    #[must_use]
    pub const fn summary(&self) -> Option<&PredictionSummary> {
        match self {
            Self::ProgramComplete { .. } => None,
            Self::TargetImpossible { summary, .. } | Self::NoCombinations { summary, .. } => {
                Some(summary)
            }
            Self::Predicted(result) => Some(&result.summary),
        }
    }
}

/// Runs predictions against one grade scale
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    scale: GradeScale,
    options: PredictionOptions,
}

impl Predictor {
    /// Create a predictor
    #[must_use]
    pub const fn new(scale: GradeScale, options: PredictionOptions) -> Self {
        Self { scale, options }
    }

    /// Grade scale in use
    #[must_use]
    pub const fn scale(&self) -> &GradeScale {
        &self.scale
    }

    /// Options in use
    #[must_use]
    pub const fn options(&self) -> &PredictionOptions {
        &self.options
    }

    /// Run the full pipeline for `request`.
    ///
    /// # Errors
    /// Returns a [`PredictError`] for an unknown target, a zero result count,
    /// constraints naming unknown grades or excluding every grade, remaining
    /// credits below one course, more remaining courses than `max_courses`,
    /// or an explicit exhaustive search over the exhaustive limit.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome, PredictError> {
        if request.result_count == 0 {
            return Err(PredictError::InvalidResultCount);
        }
        let state = &request.state;
        let table = ThresholdTable::for_variant(request.thresholds);

        if state.is_complete() {
            let final_cgpa = if state.completed_credits > 0.0 {
                state.current_cgpa
            } else {
                0.0
            };
            let final_class = classify(final_cgpa, &table).name.clone();
            crate::debug!("No remaining credits; final CGPA {final_cgpa:.2}");
            return Ok(PredictionOutcome::ProgramComplete {
                message: format!(
                    "Your program is completed with a final CGPA of {final_cgpa:.2} and a class of {final_class}."
                ),
                final_cgpa,
                final_class,
            });
        }

        let target_cgpa = request.target.threshold(&table)?;
        let courses = state.remaining_course_count();
        if courses == 0 {
            return Err(PredictError::NoRemainingCourses {
                remaining: state.remaining_credits,
                per_course: state.credits_per_course,
            });
        }
        if courses > self.options.max_courses {
            return Err(PredictError::CourseLimitExceeded {
                courses,
                limit: self.options.max_courses,
            });
        }
        let rules = request.constraints.resolve(&self.scale)?;
        let required = target_cgpa.and_then(|t| arithmetic::required_average(state, t));

        let max_cgpa = max_attainable_cgpa(state, &self.scale);
        let summary = PredictionSummary {
            current_cgpa: state.current_cgpa,
            current_class: classify(state.current_cgpa, &table).name.clone(),
            completed_credits: state.completed_credits,
            remaining_credits: state.remaining_credits,
            remaining_courses: courses,
            max_attainable_cgpa: max_cgpa,
            max_attainable_class: classify(max_cgpa, &table).name.clone(),
            target: request.target.to_string(),
            target_class: request.target.class_name(&table),
            target_cgpa,
            required_average: required,
            thresholds: request.thresholds,
        };
        crate::debug!(
            "Feasibility bound {max_cgpa:.3} over {courses} courses; required average {}",
            required.map_or_else(|| "none".to_string(), |r| format!("{r:.3}"))
        );

        let strategy = self
            .options
            .strategy
            .resolve(courses, self.options.max_exhaustive_courses)?;
        let searcher: Box<dyn GradeSearch> = match strategy {
            Strategy::Sampling => Box::new(MonteCarlo::new(SamplingOptions {
                trials: self.options.sample_trials,
                seed: self.options.sample_seed,
                stop_after: Some(request.result_count.saturating_mul(SAMPLE_RESULT_MULTIPLE)),
            })),
            Strategy::Auto | Strategy::Exhaustive => Box::new(Backtracking),
        };
        crate::debug!("Searching with strategy {strategy}");

        let search = SearchRequest {
            scale: &self.scale,
            rules: &rules,
            courses,
            required_average: required,
        };
        let report = match run_search(&search, searcher.as_ref()) {
            SearchOutcome::Impossible {
                required_average,
                max_points,
            } => {
                return Ok(PredictionOutcome::TargetImpossible {
                    summary,
                    required_average,
                    max_points,
                })
            }
            SearchOutcome::Searched(report) => report,
        };

        if report.combinations.is_empty() {
            return Ok(PredictionOutcome::NoCombinations {
                summary,
                strategy,
                complete: report.complete,
            });
        }

        Ok(PredictionOutcome::Predicted(self.assemble(
            state,
            &table,
            summary,
            report,
            strategy,
            Selection::for_mode(self.options.selection, request.result_count),
        )))
    }

    fn assemble(
        &self,
        state: &AcademicState,
        table: &ThresholdTable,
        summary: PredictionSummary,
        report: SearchReport,
        strategy: Strategy,
        selection: Selection,
    ) -> PredictionResult {
        let total_found = report.combinations.len();
        let selected = select(report.combinations, selection);
        if let Some(best) = selected.first() {
            crate::verbose!(
                "Best of {total_found} combinations: {}",
                best.letters(&self.scale).join(" ")
            );
        }
        let combinations = selected
            .iter()
            .enumerate()
            .map(|(i, combo)| self.present(i + 1, combo, state, table))
            .collect();

        PredictionResult {
            summary,
            combinations,
            total_found,
            strategy,
            complete: report.complete,
        }
    }

    fn present(
        &self,
        rank: usize,
        combo: &Combination,
        state: &AcademicState,
        table: &ThresholdTable,
    ) -> RankedCombination {
        let breakdown = combo
            .histogram(self.scale.len())
            .into_iter()
            .enumerate()
            .filter(|&(_, count)| count > 0)
            .map(|(index, count)| GradeCount {
                letter: self.scale.letter_at(index).to_string(),
                count,
            })
            .collect();
        let average_gpa = combo.average_gpa();
        let projected_final_cgpa = arithmetic::project(state, average_gpa);

        RankedCombination {
            rank,
            breakdown,
            average_gpa,
            total_points: combo.total_points(state.credits_per_course),
            projected_final_cgpa,
            resulting_class: classify(projected_final_cgpa, table).name.clone(),
        }
    }
}
