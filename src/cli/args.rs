//! Command-line argument definitions for the stream data processor
//!
//! This module defines the CLI interface using the clap derive API. Flags
//! given here override the configuration file and environment.

use crate::app::models::InstrumentMode;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the stream data processor
///
/// Consolidates multi-parameter logger workbooks and temperature logger
/// exports into a summary table with daily per-site medians.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "streamdata-processor",
    version,
    about = "Normalize stream-monitoring logger exports and compute daily site medians",
    long_about = "Scans a directory of field-instrument exports, normalizes every logger workbook \
                  or temperature CSV into one canonical summary table, computes daily per-site \
                  medians and optionally writes regulator submission files. A file that cannot \
                  be understood is logged and skipped; the rest of the batch still runs."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process a directory of instrument exports (main command)
    Process(ProcessArgs),
    /// Show the site alias tables in effect
    Sites(SitesArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Directory scanned recursively for instrument exports
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Directory containing the instrument exports"
    )]
    pub input_path: Option<PathBuf>,

    /// Directory for the summary, exports and diagnostic log
    ///
    /// Created if missing. Defaults to ./ProcessedStreamData
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Directory for generated files"
    )]
    pub output_path: Option<PathBuf>,

    /// Instrument family to process
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        help = "Instrument family: logger workbooks or temperature CSVs"
    )]
    pub mode: Option<InstrumentMode>,

    /// Write the regulator submission files
    ///
    /// Logger runs write StreamData_DoE.csv from the daily medians. Temperature
    /// runs write one <site>_Temperature_DoE.csv per site with every reading.
    #[arg(
        long = "regulatory-export",
        help = "Also write the regulator submission files"
    )]
    pub regulatory_export: bool,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// List the files that would be processed without writing anything
    #[arg(
        long = "dry-run",
        help = "Show what would be processed without creating output files"
    )]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the final report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the sites command
#[derive(Debug, Clone, Parser)]
pub struct SitesArgs {
    /// Only show the table for one instrument family
    #[arg(short = 'm', long = "mode", value_enum)]
    pub mode: Option<InstrumentMode>,

    /// Path to configuration file whose alias extensions are included
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format for the alias tables
    #[arg(long = "format", value_enum, default_value = "human")]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    input_path.display()
                )));
            }
            if !input_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is not a directory: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(output_path) = &self.output_path {
            if output_path.is_file() {
                return Err(Error::configuration(format!(
                    "Output path is a file: {}",
                    output_path.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl SitesArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            mode: None,
            regulatory_export: false,
            config_file: None,
            dry_run: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}
