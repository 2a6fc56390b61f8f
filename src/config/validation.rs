//! Configuration validation utilities and rules

use crate::{
    models::{Config, EmptyRunPolicy},
    error::Result,
};

/// Configuration validator that reports non-fatal findings
pub struct ConfigValidator;

impl ConfigValidator {
    /// Hard validation first, then advisory checks
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        // Basic validation (already done in Config::validate)
        config.validate()?;

        warnings.extend(Self::validate_output(config));
        warnings.extend(Self::validate_inputs(config));

        Ok(warnings)
    }

    fn validate_output(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let extension = config.output_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_deref() {
            Some("png") => {}
            Some(other) => warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Output '{}' has extension '.{}'; the image encoder is chosen from the extension and PNG is expected", config.output_path.display(), other),
            )),
            None => warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Output '{}' has no extension; rendering will likely fail", config.output_path.display()),
            )),
        }

        if config.output_path.exists() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Output '{}' already exists and will be overwritten", config.output_path.display()),
            ));
        }

        warnings
    }

    fn validate_inputs(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if !config.base_dir.is_dir() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Base directory '{}' does not exist; the first run will fail", config.base_dir.display()),
            ));
        }

        if config.empty_runs == EmptyRunPolicy::Nan {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Runs without measurement files will be reported as NaN and left out of the chart".to_string(),
            ));
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

/// Validation warning with level and message
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            use colored::Colorize;
            let tag = match self.level {
                ValidationLevel::Info => self.level.as_str().blue(),
                ValidationLevel::Warning => self.level.as_str().yellow(),
            };
            format!("[{}] {}", tag, self.message)
        } else {
            format!("[{}] {}", self.level.as_str(), self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = Config { first_run: 0, ..Config::default() };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_clean_config_has_no_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            base_dir: temp_dir.path().to_path_buf(),
            output_path: temp_dir.path().join("latencies.png"),
            ..Config::default()
        };

        assert!(validate_config(&config).unwrap().is_empty());
    }

    #[test]
    fn test_output_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("old.png");
        std::fs::write(&existing, b"stale").unwrap();

        let config = Config {
            base_dir: temp_dir.path().to_path_buf(),
            output_path: existing,
            ..Config::default()
        };
        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, ValidationLevel::Info);
        assert!(warnings[0].message.contains("overwritten"));

        let config = Config {
            base_dir: temp_dir.path().to_path_buf(),
            output_path: PathBuf::from("chart.svg"),
            ..Config::default()
        };
        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.level == ValidationLevel::Warning && w.message.contains(".svg")));
    }

    #[test]
    fn test_input_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            base_dir: temp_dir.path().join("missing"),
            output_path: temp_dir.path().join("latencies.png"),
            empty_runs: EmptyRunPolicy::Nan,
            ..Config::default()
        };

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("does not exist"));
        assert!(warnings[1].message.contains("NaN"));
        assert_eq!(warnings[1].format(false), format!("[INFO] {}", warnings[1].message));
    }
}
