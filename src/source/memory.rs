//! In-memory measurement source

use super::{has_extension, MeasurementSource};
use crate::error::{AppError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Measurement files held in memory, keyed by directory then file name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dirs: BTreeMap<PathBuf, BTreeMap<String, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory, even if it stays empty
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.entry(dir.into()).or_default();
        self
    }

    /// Add a file with the given contents
    pub fn with_file(mut self, dir: impl Into<PathBuf>, name: &str, contents: &str) -> Self {
        self.insert(dir, name, contents);
        self
    }

    pub fn insert(&mut self, dir: impl Into<PathBuf>, name: &str, contents: &str) {
        self.dirs
            .entry(dir.into())
            .or_default()
            .insert(name.to_string(), contents.to_string());
    }
}

impl MeasurementSource for MemorySource {
    fn list_measurements(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let files = self
            .dirs
            .get(dir)
            .ok_or_else(|| AppError::io(format!("error reading directory (path={}, error=not found)", dir.display())))?;

        Ok(files
            .keys()
            .map(|name| dir.join(name))
            .filter(|path| has_extension(path, extension))
            .collect())
    }

    fn read_first_line(&self, path: &Path) -> Result<String> {
        let contents = path
            .parent()
            .and_then(|dir| self.dirs.get(dir))
            .and_then(|files| {
                let name = path.file_name()?.to_str()?;
                files.get(name)
            })
            .ok_or_else(|| AppError::io(format!("error opening {} (not found)", path.display())))?;

        Ok(contents
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }
}
