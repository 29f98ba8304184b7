//! Run statistics returned to the control surface

use super::context::FileOutcome;
use serde::Serialize;
use std::time::Duration;

/// Counters for one processing run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Files matched by the scanner
    pub files_discovered: usize,
    /// Files normalized successfully
    pub files_processed: usize,
    /// Files rejected with a file-level error
    pub files_failed: usize,
    /// Canonical rows written to the summary
    pub rows_written: usize,
    /// Blank or event rows skipped
    pub blank_rows_skipped: usize,
    /// Cells of an unrecognized type
    pub unknown_cells: usize,
    /// Readings fed into the median index
    pub readings_recorded: usize,
    /// Rows in the MEDIAN VALUES section
    pub medians_written: usize,
    /// Rows across all regulatory exports
    pub regulatory_rows_written: usize,
    /// Distinct canonical sites reported
    pub sites_seen: usize,
    /// Wall-clock processing time
    pub duration: Duration,
    /// Rejected files with the reason
    pub failed_files: Vec<(String, String)>,
    /// Output files and their sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl RunStats {
    /// Fold one file's outcome into the totals
    pub fn absorb(&mut self, outcome: &FileOutcome) {
        self.files_processed += 1;
        self.rows_written += outcome.rows_written;
        self.blank_rows_skipped += outcome.blank_rows_skipped;
        self.unknown_cells += outcome.unknown_cells;
        self.readings_recorded += outcome.readings_recorded;
    }

    /// Record a rejected file
    pub fn record_failure(&mut self, file: impl Into<String>, reason: impl Into<String>) {
        self.files_failed += 1;
        self.failed_files.push((file.into(), reason.into()));
    }

    /// Whether any input file was rejected
    pub fn some_files_failed(&self) -> bool {
        self.files_failed > 0
    }

    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
