//! File scanner for discovering instrument exports under an input directory
//!
//! Walks the input tree recursively, skips excluded names and anything inside
//! the output directory, and keeps files whose names match the pattern for the
//! configured instrument mode. Results are sorted by path for a stable
//! processing order.

use crate::config::Config;
use crate::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Information about a discovered input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size_bytes: u64,
}

impl DiscoveredFile {
    /// Get the base filename without path
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }
}

/// Scanner for instrument export files
#[derive(Debug, Clone)]
pub struct FileScanner {
    pattern: Regex,
    excluded_names: Vec<String>,
    excluded_dir: Option<PathBuf>,
}

impl FileScanner {
    /// Create a scanner for a file name pattern
    pub fn new(pattern: &str, excluded_names: Vec<String>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::configuration(format!("Invalid file pattern '{}': {}", pattern, e))
        })?;
        Ok(Self {
            pattern,
            excluded_names,
            excluded_dir: None,
        })
    }

    /// Create a scanner from the run configuration
    ///
    /// The output directory is excluded so earlier outputs are never read back.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(
            Self::new(config.file_pattern(), config.processing.excluded_names.clone())?
                .excluding_dir(&config.processing.output_dir),
        )
    }

    /// Skip everything under this directory
    pub fn excluding_dir(mut self, dir: &Path) -> Self {
        self.excluded_dir = Some(dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()));
        self
    }

    /// Whether a file name is selected by this scanner
    pub fn matches(&self, file_name: &str) -> bool {
        !self.excluded_names.iter().any(|n| n == file_name) && self.pattern.is_match(file_name)
    }

    fn in_excluded_dir(&self, path: &Path) -> bool {
        let Some(excluded) = &self.excluded_dir else {
            return false;
        };
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        path.starts_with(excluded)
    }

    /// Scan the input directory
    pub fn scan(&self, root: &Path) -> Result<Vec<DiscoveredFile>> {
        info!("Scanning {} for input files", root.display());

        if !root.is_dir() {
            return Err(Error::io(
                format!("Input directory does not exist: {}", root.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "Directory not found"),
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !self.matches(&file_name) {
                debug!("Skipping {}", entry.path().display());
                continue;
            }
            if self.in_excluded_dir(entry.path()) {
                debug!("Skipping output file {}", entry.path().display());
                continue;
            }

            let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
            debug!("Adding {}", entry.path().display());
            files.push(DiscoveredFile {
                path: entry.path().to_path_buf(),
                size_bytes,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        info!("Discovered {} input files", files.len());
        Ok(files)
    }
}
