//! Configuration data model and validation

use crate::defaults;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

/// What to do with a run directory that holds no measurement files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyRunPolicy {
    /// Abort the whole pipeline with a statistics error
    #[default]
    Error,
    /// Report NaN for both averages of that run
    Nan,
}

impl FromStr for EmptyRunPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "nan" => Ok(Self::Nan),
            other => Err(AppError::config(format!(
                "Invalid empty-run policy '{}': expected 'error' or 'nan'",
                other
            ))),
        }
    }
}

impl fmt::Display for EmptyRunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Nan => write!(f, "nan"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one subdirectory per run
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// First client count (inclusive)
    #[serde(default = "default_first_run")]
    pub first_run: u32,

    /// Last client count (inclusive)
    #[serde(default = "default_last_run")]
    pub last_run: u32,

    /// Run subdirectory name prefix, followed by the client count
    #[serde(default = "default_run_prefix")]
    pub run_prefix: String,

    /// Extension of measurement files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Where the chart image is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Handling of runs without measurement files
    #[serde(default)]
    pub empty_runs: EmptyRunPolicy,

    /// Chart title
    #[serde(default = "default_title")]
    pub title: String,

    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Print the series as JSON instead of a table
    #[serde(default)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            first_run: default_first_run(),
            last_run: default_last_run(),
            run_prefix: default_run_prefix(),
            extension: default_extension(),
            output_path: default_output_path(),
            empty_runs: EmptyRunPolicy::default(),
            title: default_title(),
            width: default_width(),
            height: default_height(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            json: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Client counts to aggregate, in ascending order
    pub fn runs(&self) -> RangeInclusive<u32> {
        self.first_run..=self.last_run
    }

    /// Number of runs in the configured range
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Directory holding the measurement files of one run
    pub fn run_directory(&self, clients: u32) -> PathBuf {
        self.base_dir.join(format!("{}{}", self.run_prefix, clients))
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(AppError::config("Base directory cannot be empty"));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(AppError::config("Output path cannot be empty"));
        }

        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(AppError::config(format!(
                "Measurement extension must be non-empty and given without a dot, got '{}'",
                self.extension
            )));
        }

        if self.run_prefix.contains(std::path::MAIN_SEPARATOR) || self.run_prefix.contains('/') {
            return Err(AppError::config(format!(
                "Run prefix cannot contain a path separator: '{}'",
                self.run_prefix
            )));
        }

        if self.first_run == 0 {
            return Err(AppError::config("First run must be at least 1 client"));
        }

        if self.first_run > self.last_run {
            return Err(AppError::config(format!(
                "First run ({}) cannot be greater than last run ({})",
                self.first_run, self.last_run
            )));
        }

        if self.last_run == u32::MAX {
            return Err(AppError::config(format!("Last run must be below {}", u32::MAX)));
        }

        if self.last_run - self.first_run >= defaults::MAX_RUN_SPAN {
            return Err(AppError::config(format!(
                "Run range cannot span more than {} runs",
                defaults::MAX_RUN_SPAN
            )));
        }

        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(defaults::MIN_DIMENSION..=defaults::MAX_DIMENSION).contains(&value) {
                return Err(AppError::config(format!(
                    "Image {} must be between {} and {} pixels, got {}",
                    name,
                    defaults::MIN_DIMENSION,
                    defaults::MAX_DIMENSION,
                    value
                )));
            }
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(base_dir) = std::env::var("LATENCY_BASE_DIR") {
            if !base_dir.trim().is_empty() {
                self.base_dir = PathBuf::from(base_dir.trim());
            }
        }

        if let Ok(first_run) = std::env::var("LATENCY_FIRST_RUN") {
            self.first_run = first_run.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid LATENCY_FIRST_RUN value '{}': {}", first_run, e)))?;
        }

        if let Ok(last_run) = std::env::var("LATENCY_LAST_RUN") {
            self.last_run = last_run.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid LATENCY_LAST_RUN value '{}': {}", last_run, e)))?;
        }

        if let Ok(output) = std::env::var("LATENCY_OUTPUT") {
            if !output.trim().is_empty() {
                self.output_path = PathBuf::from(output.trim());
            }
        }

        if let Ok(policy) = std::env::var("LATENCY_EMPTY_RUNS") {
            self.empty_runs = policy.parse()?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_BASE_DIR)
}

fn default_first_run() -> u32 {
    defaults::DEFAULT_FIRST_RUN
}

fn default_last_run() -> u32 {
    defaults::DEFAULT_LAST_RUN
}

fn default_run_prefix() -> String {
    defaults::DEFAULT_RUN_PREFIX.to_string()
}

fn default_extension() -> String {
    defaults::DEFAULT_EXTENSION.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_OUTPUT_PATH)
}

fn default_title() -> String {
    defaults::DEFAULT_TITLE.to_string()
}

fn default_width() -> u32 {
    defaults::DEFAULT_WIDTH
}

fn default_height() -> u32 {
    defaults::DEFAULT_HEIGHT
}

fn default_enable_color() -> bool {
    defaults::DEFAULT_ENABLE_COLOR
}
