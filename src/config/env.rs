//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variables read by the configuration layer
pub const ENV_VARS: &[&str] = &[
    "LATENCY_BASE_DIR",
    "LATENCY_FIRST_RUN",
    "LATENCY_LAST_RUN",
    "LATENCY_OUTPUT",
    "LATENCY_EMPTY_RUNS",
    "ENABLE_COLOR",
];

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file from the working directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load a specific env file if it exists; variables already set win
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {} file: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_file_without_assignments_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "# LATENCY_LAST_RUN=3\n\n").unwrap();

        assert!(EnvManager::load_env_file_from(&path, false).is_ok());
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(EnvManager::load_env_file_from(&temp_dir.path().join(".env"), false).is_ok());
    }
}
