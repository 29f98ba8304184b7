//! Output sinks for a processing run
//!
//! - [`summary`] - Canonical summary table with its MEDIAN VALUES section
//! - [`regulatory`] - Agency submission template, per median or per reading
//! - [`diagnostics`] - Plain-text diagnostic log
//!
//! Readers write through the sink traits below so tests can collect output in
//! memory instead of files.

pub mod diagnostics;
pub mod regulatory;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use diagnostics::DiagnosticLog;
pub use regulatory::{RegulatoryWriter, TemperatureExports, render_regulatory_row};
pub use summary::SummaryWriter;

use crate::Result;
use crate::app::models::{CanonicalRow, RawReading};

/// Destination for canonical rows
pub trait RowSink {
    fn write_row(&mut self, row: &CanonicalRow) -> Result<()>;
}

/// Destination for per-reading regulatory rows
pub trait ReadingSink {
    fn write_reading(&mut self, reading: &RawReading) -> Result<()>;
}

/// Destination for non-fatal diagnostic messages
pub trait DiagnosticSink {
    fn diagnostic(&mut self, message: &str) -> Result<()>;
}

impl RowSink for Vec<CanonicalRow> {
    fn write_row(&mut self, row: &CanonicalRow) -> Result<()> {
        self.push(row.clone());
        Ok(())
    }
}

impl ReadingSink for Vec<RawReading> {
    fn write_reading(&mut self, reading: &RawReading) -> Result<()> {
        self.push(reading.clone());
        Ok(())
    }
}

impl DiagnosticSink for Vec<String> {
    fn diagnostic(&mut self, message: &str) -> Result<()> {
        self.push(message.to_string());
        Ok(())
    }
}
