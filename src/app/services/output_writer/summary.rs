//! Summary table writer
//!
//! Writes the canonical header, one row per accepted input row, then a blank
//! line, the `MEDIAN VALUES` marker and one `Site,"Measurement",Date,Median`
//! line per bucket.

use super::RowSink;
use crate::app::models::{CanonicalRow, InstrumentMode, format_number};
use crate::app::services::aggregation::{MedianRow, MedianSink};
use crate::constants::MEDIAN_SECTION_MARKER;
use crate::{Error, Result};
use std::io::Write;

/// Which part of the summary is being written
enum Section<W: Write> {
    /// Canonical rows through the CSV encoder
    Rows(csv::Writer<W>),
    /// Median lines written directly after the marker
    Medians(W),
}

/// Streaming writer for the summary CSV
pub struct SummaryWriter<W: Write> {
    section: Option<Section<W>>,
    label: String,
    rows_written: usize,
    medians_written: usize,
}

impl<W: Write> SummaryWriter<W> {
    /// Create a writer and emit the header for the instrument mode
    pub fn new(inner: W, mode: InstrumentMode, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(inner);
        writer
            .write_record(mode.summary_header())
            .map_err(|e| Error::output_sink(&label, e.to_string(), None))?;

        Ok(Self {
            section: Some(Section::Rows(writer)),
            label,
            rows_written: 0,
            medians_written: 0,
        })
    }

    fn sink_error(&self, error: impl std::fmt::Display) -> Error {
        Error::output_sink(&self.label, error.to_string(), None)
    }

    fn closed(&self) -> Error {
        self.sink_error("summary writer is closed after an earlier failure")
    }

    /// Start the median section; later calls do nothing
    pub fn begin_median_section(&mut self) -> Result<()> {
        let rows = match self.section.take() {
            Some(Section::Rows(rows)) => rows,
            Some(medians @ Section::Medians(_)) => {
                self.section = Some(medians);
                return Ok(());
            }
            None => return Err(self.closed()),
        };

        let mut inner = rows.into_inner().map_err(|e| self.sink_error(e.error()))?;
        write!(inner, "\n{}\n", MEDIAN_SECTION_MARKER).map_err(|e| self.sink_error(e))?;
        self.section = Some(Section::Medians(inner));
        Ok(())
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        let result = match self.section.as_mut() {
            Some(Section::Rows(rows)) => rows.flush(),
            Some(Section::Medians(inner)) => inner.flush(),
            None => return Err(self.closed()),
        };
        result.map_err(|e| self.sink_error(e))
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        match self.section.take() {
            Some(Section::Rows(rows)) => rows.into_inner().map_err(|e| self.sink_error(e.error())),
            Some(Section::Medians(mut inner)) => {
                inner.flush().map_err(|e| self.sink_error(e))?;
                Ok(inner)
            }
            None => Err(self.closed()),
        }
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn medians_written(&self) -> usize {
        self.medians_written
    }
}

/// Encode one field with the CSV quoting rules
fn encode_field(text: &str) -> Result<String> {
    let sink_error = |message: String| Error::output_sink("summary", message, None);
    let mut field = csv::Writer::from_writer(Vec::new());
    field
        .write_field(text)
        .map_err(|e| sink_error(e.to_string()))?;
    let bytes = field
        .into_inner()
        .map_err(|e| sink_error(e.error().to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl<W: Write> RowSink for SummaryWriter<W> {
    fn write_row(&mut self, row: &CanonicalRow) -> Result<()> {
        let rows = match self.section.as_mut() {
            Some(Section::Rows(rows)) => rows,
            Some(Section::Medians(_)) => {
                return Err(self.sink_error(
                    "canonical row written after the median section started",
                ));
            }
            None => return Err(self.closed()),
        };
        let result = rows.write_record(row.to_record());
        result.map_err(|e| self.sink_error(e))?;
        self.rows_written += 1;
        Ok(())
    }
}

impl<W: Write> MedianSink for SummaryWriter<W> {
    fn write_median(&mut self, row: &MedianRow) -> Result<()> {
        self.begin_median_section()?;
        let site = encode_field(&row.site)?;
        let Some(Section::Medians(inner)) = self.section.as_mut() else {
            return Err(self.closed());
        };
        let result = writeln!(
            inner,
            "{},\"{}\",{},{}",
            site,
            row.measurement,
            row.date.format("%Y-%m-%d"),
            format_number(row.median)
        );
        result.map_err(|e| self.sink_error(e))?;
        self.medians_written += 1;
        Ok(())
    }
}
