//! Per-file processing context and outcome

use crate::app::models::SiteMetadata;
use crate::app::services::aggregation::AggregationIndex;
use crate::app::services::output_writer::{DiagnosticSink, ReadingSink, RowSink};
use crate::app::services::site_resolver::SiteResolver;

/// Everything a reader needs to normalize one file
///
/// The index and sinks are borrowed from the run; nothing here outlives the
/// call that processes a single file.
pub struct FileContext<'a> {
    pub resolver: &'a SiteResolver,
    pub index: &'a mut AggregationIndex,
    pub rows: &'a mut dyn RowSink,
    pub diagnostics: &'a mut dyn DiagnosticSink,
    /// Per-reading regulatory export, when enabled for this mode
    pub readings: Option<&'a mut dyn ReadingSink>,
}

/// Result of normalizing one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    /// Canonical site the file reported
    pub site: String,
    pub metadata: SiteMetadata,
    pub rows_written: usize,
    pub blank_rows_skipped: usize,
    pub unknown_cells: usize,
    pub readings_recorded: usize,
}

impl FileOutcome {
    pub fn new(site: String, metadata: SiteMetadata) -> Self {
        Self {
            site,
            metadata,
            rows_written: 0,
            blank_rows_skipped: 0,
            unknown_cells: 0,
            readings_recorded: 0,
        }
    }
}

/// In-memory sinks for exercising readers without touching the filesystem
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHarness {
    pub resolver: SiteResolver,
    pub index: AggregationIndex,
    pub rows: Vec<crate::app::models::CanonicalRow>,
    pub diagnostics: Vec<String>,
    pub readings: Vec<crate::app::models::RawReading>,
}

#[cfg(test)]
impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the harness as a file context
    pub fn context(&mut self, collect_readings: bool) -> FileContext<'_> {
        FileContext {
            resolver: &self.resolver,
            index: &mut self.index,
            rows: &mut self.rows,
            diagnostics: &mut self.diagnostics,
            readings: if collect_readings {
                Some(&mut self.readings as &mut dyn ReadingSink)
            } else {
                None
            },
        }
    }
}
