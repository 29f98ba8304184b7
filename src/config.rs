//! Configuration management and validation.
//!
//! Provides configuration structures for processing parameters, regulatory
//! export identifiers and site alias extensions, plus the layering rules that
//! combine built-in defaults, an optional TOML file and environment overrides.

use crate::app::models::InstrumentMode;
use crate::constants::{
    DEFAULT_FIELD_COLLECTOR, DEFAULT_OUTPUT_DIR, DEFAULT_STUDY_ID, ENV_INPUT_DIR, ENV_OUTPUT_DIR,
    EXCLUDED_FILE_NAMES, LOGGER_FILE_PATTERN, TEMPERATURE_FILE_PATTERN,
};
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the configuration directory under the platform config dir
const CONFIG_DIR_NAME: &str = "streamdata-processor";

/// Name of the configuration file
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration for a processing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input discovery and output placement
    pub processing: ProcessingConfig,

    /// Fixed identifiers written into the regulatory export
    pub regulatory: RegulatoryConfig,

    /// Additional site aliases appended to the built-in tables
    pub aliases: AliasConfig,
}

/// Input discovery and output placement settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Directory scanned recursively for instrument exports
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the summary, exports and diagnostic log
    pub output_dir: PathBuf,

    /// Which instrument family this run processes
    pub mode: InstrumentMode,

    /// Write the regulator submission files
    pub regulatory_export: bool,

    /// File name pattern for logger workbooks
    pub logger_pattern: String,

    /// File name pattern for temperature exports
    pub temperature_pattern: String,

    /// File names skipped wherever they appear
    pub excluded_names: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            mode: InstrumentMode::Logger,
            regulatory_export: false,
            logger_pattern: LOGGER_FILE_PATTERN.to_string(),
            temperature_pattern: TEMPERATURE_FILE_PATTERN.to_string(),
            excluded_names: EXCLUDED_FILE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Identifiers stamped on every regulatory export row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatoryConfig {
    /// Agency study identifier
    pub study_id: String,

    /// Organisation recorded as field collector
    pub field_collector: String,
}

impl Default for RegulatoryConfig {
    fn default() -> Self {
        Self {
            study_id: DEFAULT_STUDY_ID.to_string(),
            field_collector: DEFAULT_FIELD_COLLECTOR.to_string(),
        }
    }
}

/// Site alias extensions
///
/// Entries are added to the built-in tables; a key that already exists in the
/// built-in table keeps its built-in canonical ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Extra logger labels (matched case-insensitively)
    pub logger: BTreeMap<String, String>,

    /// Extra temperature banner names (matched after whitespace normalization)
    pub temperature: BTreeMap<String, String>,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::configuration(format!("Invalid configuration file: {}", e)))
    }

    /// Load a configuration file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&contents)
    }

    /// Default configuration file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Build the layered configuration
    ///
    /// Defaults are overlaid by the explicit file (which must exist) or the
    /// default file (when present), then by the environment. CLI flags are
    /// applied afterwards by the caller.
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!("Loading configuration from {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup(ENV_INPUT_DIR).filter(|v| !v.trim().is_empty()) {
            debug!("Input directory overridden by {}", ENV_INPUT_DIR);
            self.processing.input_dir = Some(PathBuf::from(input));
        }
        if let Some(output) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            debug!("Output directory overridden by {}", ENV_OUTPUT_DIR);
            self.processing.output_dir = PathBuf::from(output);
        }
    }

    /// Set the input directory
    pub fn with_input_dir(mut self, input_dir: PathBuf) -> Self {
        self.processing.input_dir = Some(input_dir);
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.processing.output_dir = output_dir;
        self
    }

    /// Set the instrument mode
    pub fn with_mode(mut self, mode: InstrumentMode) -> Self {
        self.processing.mode = mode;
        self
    }

    /// Enable the regulatory export
    pub fn with_regulatory_export(mut self, enabled: bool) -> Self {
        self.processing.regulatory_export = enabled;
        self
    }

    /// File name pattern for the configured mode
    pub fn file_pattern(&self) -> &str {
        match self.processing.mode {
            InstrumentMode::Logger => &self.processing.logger_pattern,
            InstrumentMode::Temperature => &self.processing.temperature_pattern,
        }
    }

    /// Input directory, or a configuration error when none was given
    pub fn input_dir(&self) -> Result<&Path> {
        self.processing
            .input_dir
            .as_deref()
            .ok_or_else(|| Error::configuration("No input directory configured"))
    }

    /// Validate the configuration before a run
    pub fn validate(&self) -> Result<()> {
        let input_dir = self.input_dir()?;
        if !input_dir.exists() {
            return Err(Error::configuration(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }
        if !input_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        if self.processing.output_dir.as_os_str().is_empty() {
            return Err(Error::configuration("Output directory cannot be empty"));
        }

        for (name, pattern) in [
            ("logger_pattern", &self.processing.logger_pattern),
            ("temperature_pattern", &self.processing.temperature_pattern),
        ] {
            Regex::new(pattern).map_err(|e| {
                Error::configuration(format!("Invalid {} '{}': {}", name, pattern, e))
            })?;
        }

        if self.regulatory.study_id.trim().is_empty() {
            return Err(Error::configuration("Regulatory study_id cannot be empty"));
        }
        if self.regulatory.field_collector.trim().is_empty() {
            return Err(Error::configuration(
                "Regulatory field_collector cannot be empty",
            ));
        }

        Ok(())
    }
}
