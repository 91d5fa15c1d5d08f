//! Configuration module for `GradeTarget`

use crate::core::generator::Strategy;
use crate::core::models::ThresholdVariant;
use crate::core::prediction::{
    PredictionOptions, DEFAULT_MAX_COURSES, DEFAULT_MAX_EXHAUSTIVE_COURSES, DEFAULT_RESULT_COUNT,
};
use crate::core::ranking::SelectionMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$GRADE_TARGET";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Prediction defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Upper bound on returned combinations
    pub result_count: usize,
    /// Threshold table (standard or rounded)
    pub thresholds: ThresholdVariant,
    /// Search strategy (auto, exhaustive or sampling)
    pub strategy: Strategy,
    /// Selection mode (top or representative)
    pub selection: SelectionMode,
    /// Course count above which `auto` samples instead of enumerating
    pub max_exhaustive_courses: usize,
    /// Course count above which predictions are refused
    pub max_courses: usize,
    /// Draws per sampling search
    pub sample_trials: usize,
    /// Sampling seed; 0 seeds from the OS
    pub sample_seed: u64,
    /// Credits carried by each remaining course
    pub credits_per_course: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            result_count: DEFAULT_RESULT_COUNT,
            thresholds: ThresholdVariant::Standard,
            strategy: Strategy::Auto,
            selection: SelectionMode::Top,
            max_exhaustive_courses: DEFAULT_MAX_EXHAUSTIVE_COURSES,
            max_courses: DEFAULT_MAX_COURSES,
            sample_trials: crate::core::generator::sampling::DEFAULT_TRIALS,
            sample_seed: 0,
            credits_per_course: 3.0,
        }
    }
}

impl PredictionConfig {
    /// Search options for a [`Predictor`](crate::core::prediction::Predictor)
    #[must_use]
    pub const fn options(&self) -> PredictionOptions {
        PredictionOptions {
            strategy: self.strategy,
            selection: self.selection,
            max_exhaustive_courses: self.max_exhaustive_courses,
            max_courses: self.max_courses,
            sample_trials: self.sample_trials,
            sample_seed: if self.sample_seed == 0 {
                None
            } else {
                Some(self.sample_seed)
            },
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Prediction settings
    #[serde(default)]
    pub prediction: PredictionConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override threshold table
    pub thresholds: Option<ThresholdVariant>,
    /// Override search strategy
    pub strategy: Option<Strategy>,
}

impl Config {
    /// Get the `$GRADE_TARGET` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gradetarget`
    /// - macOS: `~/Library/Application Support/gradetarget`
    /// - Windows: `%APPDATA%\gradetarget`
    #[must_use]
    pub fn get_gradetarget_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradetarget")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// updated. Prediction fields are filled by serde when absent.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for one run; the configuration file is not modified.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(thresholds) = overrides.thresholds {
            self.prediction.thresholds = thresholds;
        }
        if let Some(strategy) = overrides.strategy {
            self.prediction.strategy = strategy;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_gradetarget_dir`](Self::get_gradetarget_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gradetarget_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GRADE_TARGET` to the config directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gradetarget_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$GRADE_TARGET` in path values. Missing fields take their
    /// serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled in and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with the defaults (and re-saved when that
    /// adds fields). On first run the directory and file are created. Any
    /// read or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `result_count`,
    /// `thresholds`, `strategy`, `selection`, `max_exhaustive_courses`,
    /// `max_courses`, `sample_trials`, `sample_seed`, `credits_per_course`, `reports_dir`.
    /// Dashes may stand in for underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let p = &self.prediction;
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "result_count" => Some(p.result_count.to_string()),
            "thresholds" => Some(p.thresholds.to_string()),
            "strategy" => Some(p.strategy.to_string()),
            "selection" => Some(p.selection.to_string()),
            "max_exhaustive_courses" => Some(p.max_exhaustive_courses.to_string()),
            "max_courses" => Some(p.max_courses.to_string()),
            "sample_trials" => Some(p.sample_trials.to_string()),
            "sample_seed" => Some(p.sample_seed.to_string()),
            "credits_per_course" => Some(p.credits_per_course.to_string()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value does not
    /// parse for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let p = &mut self.prediction;
        match key.replace('-', "_").as_str() {
            "level" => {
                crate::logger::Level::from_str(value)?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_value(key, value)?,
            "result_count" => {
                let count: usize = parse_value(key, value)?;
                if count == 0 {
                    return Err("result_count must be at least 1".to_string());
                }
                p.result_count = count;
            }
            "thresholds" => p.thresholds = value.parse()?,
            "strategy" => p.strategy = value.parse()?,
            "selection" => p.selection = value.parse()?,
            "max_exhaustive_courses" => p.max_exhaustive_courses = parse_value(key, value)?,
            "max_courses" => {
                let limit: usize = parse_value(key, value)?;
                if limit == 0 {
                    return Err("max_courses must be at least 1".to_string());
                }
                p.max_courses = limit;
            }
            "sample_trials" => p.sample_trials = parse_value(key, value)?,
            "sample_seed" => p.sample_seed = parse_value(key, value)?,
            "credits_per_course" => {
                let credits: f64 = parse_value(key, value)?;
                if !credits.is_finite() || credits <= 0.0 {
                    return Err(format!("credits_per_course must be positive, got '{value}'"));
                }
                p.credits_per_course = credits;
            }
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to its default)
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let p = &mut self.prediction;
        let d = &defaults.prediction;
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "result_count" => p.result_count = d.result_count,
            "thresholds" => p.thresholds = d.thresholds,
            "strategy" => p.strategy = d.strategy,
            "selection" => p.selection = d.selection,
            "max_exhaustive_courses" => p.max_exhaustive_courses = d.max_exhaustive_courses,
            "max_courses" => p.max_courses = d.max_courses,
            "sample_trials" => p.sample_trials = d.sample_trials,
            "sample_seed" => p.sample_seed = d.sample_seed,
            "credits_per_course" => p.credits_per_course = d.credits_per_course,
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        let p = &self.prediction;
        writeln!(f, "\n[prediction]")?;
        writeln!(f, "  result_count = {}", p.result_count)?;
        writeln!(f, "  thresholds = \"{}\"", p.thresholds)?;
        writeln!(f, "  strategy = \"{}\"", p.strategy)?;
        writeln!(f, "  selection = \"{}\"", p.selection)?;
        writeln!(f, "  max_exhaustive_courses = {}", p.max_exhaustive_courses)?;
        writeln!(f, "  max_courses = {}", p.max_courses)?;
        writeln!(f, "  sample_trials = {}", p.sample_trials)?;
        writeln!(f, "  sample_seed = {}", p.sample_seed)?;
        writeln!(f, "  credits_per_course = {:.1}", p.credits_per_course)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
