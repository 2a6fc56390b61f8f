//! Measurement file discovery and reading
//!
//! The pipeline only talks to the file system through [`MeasurementSource`],
//! so aggregation can be exercised against [`MemorySource`] without fixtures.

mod memory;

pub use memory::MemorySource;

use crate::error::{AppError, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Directory listing and file reading capability
pub trait MeasurementSource {
    /// Files directly inside `dir` whose extension is `extension`.
    /// Not recursive; order is unspecified.
    fn list_measurements(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>>;

    /// First line of the file without its line terminator.
    /// An empty file yields an empty string.
    fn read_first_line(&self, path: &Path) -> Result<String>;
}

impl<S: MeasurementSource + ?Sized> MeasurementSource for &S {
    fn list_measurements(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        (**self).list_measurements(dir, extension)
    }

    fn read_first_line(&self, path: &Path) -> Result<String> {
        (**self).read_first_line(path)
    }
}

/// Reads measurements from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemSource;

impl FileSystemSource {
    pub fn new() -> Self {
        Self
    }
}

impl MeasurementSource for FileSystemSource {
    fn list_measurements(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| {
            AppError::io(format!("error reading directory (path={}, error={})", dir.display(), e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                AppError::io(format!("error opening directory entry in {} ({})", dir.display(), e))
            })?;
            let path = entry.path();
            if has_extension(&path, extension) {
                files.push(path);
            }
        }

        Ok(files)
    }

    fn read_first_line(&self, path: &Path) -> Result<String> {
        let file = File::open(path)
            .map_err(|e| AppError::io(format!("error opening {} ({})", path.display(), e)))?;

        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(|e| AppError::io(format!("error reading {} ({})", path.display(), e)))?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Whether the file name ends in `.<extension>`. A name that is only the
/// suffix, such as `.txt`, matches too.
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(extension))
        .is_some_and(|stem| stem.ends_with('.'))
}
