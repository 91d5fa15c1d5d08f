//! CLI argument definitions for `GradeTarget`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use grade_target::core::config::ConfigOverrides;
use grade_target::core::generator::Strategy;
use grade_target::core::models::{AcademicState, Constraints, ThresholdVariant};
use grade_target::core::ranking::SelectionMode;
use grade_target::logger::Level;
use grade_target::PredictError;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `strategy`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// A student's current standing
#[derive(Debug, Clone, Args)]
pub struct StateArgs {
    /// Current CGPA (0-4)
    #[arg(long = "cgpa", value_name = "CGPA")]
    pub current_cgpa: f64,

    /// Credits completed so far
    #[arg(long, value_name = "CREDITS", default_value_t = 0.0)]
    pub completed: f64,

    /// Credits still to be taken
    #[arg(long, value_name = "CREDITS", conflicts_with = "courses")]
    pub remaining: Option<f64>,

    /// Number of remaining courses (alternative to --remaining)
    #[arg(long, value_name = "N")]
    pub courses: Option<usize>,

    /// Credits per remaining course (defaults to config `credits_per_course`)
    #[arg(long, value_name = "CREDITS")]
    pub credits_per_course: Option<f64>,
}

impl StateArgs {
    /// Build a validated state, using `default_per_course` when no
    /// `--credits-per-course` was given
    ///
    /// # Errors
    /// Returns an error if the values are out of range.
    pub fn to_state(&self, default_per_course: f64) -> Result<AcademicState, PredictError> {
        let per_course = self.credits_per_course.unwrap_or(default_per_course);
        match self.courses {
            Some(courses) => {
                AcademicState::from_course_count(self.current_cgpa, self.completed, courses, per_course)
            }
            None => AcademicState::new(
                self.current_cgpa,
                self.completed,
                self.remaining.unwrap_or(0.0),
                per_course,
            ),
        }
    }
}

/// Restrictions on the generated combinations
#[derive(Debug, Clone, Default, Args)]
pub struct ConstraintArgs {
    /// Cap occurrences of a grade, as LETTER=COUNT (repeatable)
    #[arg(long = "max", value_name = "LETTER=COUNT")]
    pub max_occurrences: Vec<String>,

    /// Never assign this grade (repeatable)
    #[arg(long = "exclude", value_name = "LETTER")]
    pub exclude: Vec<String>,

    /// Reject the combination where every course gets this grade (repeatable)
    #[arg(long = "exclude-uniform", value_name = "LETTER")]
    pub exclude_uniform: Vec<String>,

    /// Reject the all-top-grade combination
    #[arg(long = "no-uniform-top")]
    pub no_uniform_top: bool,
}

impl ConstraintArgs {
    /// Convert flags into [`Constraints`]
    ///
    /// # Errors
    /// Returns an error if a `--max` value is not `LETTER=COUNT`.
    pub fn to_constraints(&self) -> Result<Constraints, PredictError> {
        let mut constraints = Constraints::new();
        for cap in &self.max_occurrences {
            let (letter, count) = Constraints::parse_cap(cap)?;
            constraints = constraints.max_occurrences_of(&letter, count);
        }
        for letter in &self.exclude {
            constraints = constraints.exclude_grade(letter);
        }
        for letter in &self.exclude_uniform {
            constraints = constraints.exclude_uniform(letter);
        }
        if self.no_uniform_top {
            constraints = constraints.without_uniform_top_grade();
        }
        Ok(constraints)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Compute CGPA and standing from a transcript CSV.
    ///
    /// The file needs a header naming Course, Credits and Grade columns.
    Calculate {
        /// Path to transcript CSV file
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find grade combinations that reach a target class.
    Predict {
        #[command(flatten)]
        state: StateArgs,

        /// Target class name or key, a CGPA, or "any"
        #[arg(short, long, value_name = "TARGET", default_value = "any")]
        target: String,

        #[command(flatten)]
        constraints: ConstraintArgs,

        /// Maximum number of combinations to show (defaults to config `result_count`)
        #[arg(short = 'n', long, value_name = "N")]
        count: Option<usize>,

        /// Selection mode: top or representative (defaults to config `selection`)
        #[arg(long, value_name = "MODE")]
        selection: Option<SelectionMode>,

        /// Seed for the sampling strategy
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Also write a report in this format (markdown, html, json)
        #[arg(long, value_name = "FORMAT")]
        report: Option<String>,

        /// Report output path (defaults to the reports directory)
        #[arg(short, long, value_name = "FILE", requires = "report")]
        output: Option<PathBuf>,
    },
    /// Show the class of degree for a CGPA.
    Classify {
        /// CGPA to classify
        #[arg(value_name = "CGPA")]
        cgpa: f64,
    },
    /// Project the final CGPA for each uniform grade on the remaining courses.
    Scenarios {
        #[command(flatten)]
        state: StateArgs,

        /// Also report what this target class or CGPA requires
        #[arg(short, long, value_name = "TARGET")]
        target: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradetarget",
    about = "CGPA calculator and grade target predictor",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override the threshold table (standard|rounded)
    #[arg(long, value_name = "TABLE")]
    pub thresholds: Option<ThresholdVariant>,

    /// Override the search strategy (auto|exhaustive|sampling)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<Strategy>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            thresholds: self.thresholds,
            strategy: self.strategy,
        }
    }
}
