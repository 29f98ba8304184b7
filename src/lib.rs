//! Stream Data Processor Library
//!
//! A Rust library for consolidating field-instrument exports from stream
//! monitoring sites into a canonical summary table, daily per-site medians and
//! regulator submission files.
//!
//! This library provides tools for:
//! - Classifying multi-parameter logger workbooks by their header layout
//! - Classifying temperature / dissolved-oxygen logger CSV exports
//! - Resolving inconsistent site labels through fixed alias tables
//! - Streaming per-site, per-day medians with adjacent-day bucket merging
//! - Writing the summary CSV, the regulatory export and a diagnostic log
//! - Per-file error isolation so one bad export never aborts a run

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregation;
        pub mod file_scanner;
        pub mod output_writer;
        pub mod pipeline;
        pub mod site_resolver;
        pub mod temperature_csv;
        pub mod workbook;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CellValue, InstrumentMode, Measurement, SourceColumn};
pub use config::Config;

/// Result type alias for the stream data processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for stream data processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed
    #[error("CSV error in '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Spreadsheet workbook could not be opened or read
    #[error("Workbook error in '{file}': {message}")]
    Workbook { file: String, message: String },

    /// Input file does not match any recognized layout
    #[error("Unrecognized format in '{file}': {message}")]
    StructuralFormat { file: String, message: String },

    /// Site label has no entry in the alias table that requires one
    #[error("Unmapped site name '{site}' in '{file}'")]
    UnmappedSiteName { file: String, site: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Median requested from an accumulator with no values
    #[error("Median requested from an empty accumulator")]
    EmptyAccumulator,

    /// Output file could not be created or written
    #[error("Cannot write output '{path}': {message}")]
    OutputSink {
        path: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a workbook read error
    pub fn workbook(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Workbook {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a structural format error
    pub fn structural_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StructuralFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an unmapped site name error
    pub fn unmapped_site_name(file: impl Into<String>, site: impl Into<String>) -> Self {
        Self::UnmappedSiteName {
            file: file.into(),
            site: site.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an output sink error
    pub fn output_sink(
        path: impl Into<String>,
        message: impl Into<String>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::OutputSink {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error rejects a single input file rather than the whole run
    ///
    /// File-level errors are logged to the diagnostic log, counted as failures
    /// and the batch continues with the next file.
    pub fn is_file_level(&self) -> bool {
        matches!(
            self,
            Error::Workbook { .. }
                | Error::StructuralFormat { .. }
                | Error::UnmappedSiteName { .. }
                | Error::CsvParsing { .. }
                | Error::DataValidation { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV operation failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<calamine::XlsError> for Error {
    fn from(error: calamine::XlsError) -> Self {
        Self::Workbook {
            file: "unknown".to_string(),
            message: error.to_string(),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_level_classification() {
        assert!(Error::structural_format("LOG1.xls", "bad header").is_file_level());
        assert!(Error::unmapped_site_name("t.csv", "Nowhere").is_file_level());
        assert!(Error::workbook("LOG1.xls", "not a workbook").is_file_level());

        assert!(!Error::output_sink("out/StreamData.csv", "denied", None).is_file_level());
        assert!(!Error::configuration("missing input").is_file_level());
        assert!(!Error::EmptyAccumulator.is_file_level());
    }

    #[test]
    fn test_error_messages_name_the_file() {
        let error = Error::structural_format("LOG7.xls", "header signature not recognized");
        assert_eq!(
            error.to_string(),
            "Unrecognized format in 'LOG7.xls': header signature not recognized"
        );

        let error = Error::unmapped_site_name("mill.csv", "Mill Crk");
        assert_eq!(error.to_string(), "Unmapped site name 'Mill Crk' in 'mill.csv'");
    }
}
