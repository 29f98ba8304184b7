//! Data models for stream data processing
//!
//! This module contains the core data structures shared by the readers, the
//! aggregation engine and the writers: the closed set of measurements, typed
//! spreadsheet cells, column plans, canonical rows and per-site metadata.

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// =============================================================================
// Instrument Mode
// =============================================================================

/// Instrument family processed by a run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentMode {
    /// Multi-parameter water-quality logger workbooks (.xls)
    Logger,
    /// Temperature / dissolved-oxygen logger CSV exports
    Temperature,
}

impl InstrumentMode {
    /// Get all instrument families
    pub fn all_values() -> [InstrumentMode; 2] {
        [InstrumentMode::Logger, InstrumentMode::Temperature]
    }

    /// Canonical columns written to the summary table, after Site and RawDataFile
    pub fn canonical_fields(self) -> &'static [CanonicalField] {
        match self {
            InstrumentMode::Logger => &LOGGER_FIELDS,
            InstrumentMode::Temperature => &TEMPERATURE_FIELDS,
        }
    }

    /// Full summary header including the site and source file columns
    pub fn summary_header(self) -> Vec<&'static str> {
        let mut header = vec!["Site", "RawDataFile"];
        header.extend(self.canonical_fields().iter().map(|f| f.column_name()));
        header
    }
}

impl fmt::Display for InstrumentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentMode::Logger => write!(f, "logger"),
            InstrumentMode::Temperature => write!(f, "temperature"),
        }
    }
}

// =============================================================================
// Measurements
// =============================================================================

/// Closed set of measurement kinds appearing in the canonical schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Measurement {
    Temperature,
    Ph,
    MilliVoltsPh,
    Conductivity,
    DissolvedOxygenPercent,
    DissolvedOxygen,
    Turbidity,
    Other,
}

/// Regulator naming for a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegulatoryParameter {
    /// Agency parameter name
    pub display_name: &'static str,
    /// Unit string expected by the agency
    pub unit: &'static str,
    /// Analytical method code
    pub method: &'static str,
}

impl Measurement {
    /// Get all measurement kinds in canonical column order
    pub fn all_values() -> [Measurement; 8] {
        [
            Measurement::Temperature,
            Measurement::Ph,
            Measurement::MilliVoltsPh,
            Measurement::Conductivity,
            Measurement::DissolvedOxygenPercent,
            Measurement::DissolvedOxygen,
            Measurement::Turbidity,
            Measurement::Other,
        ]
    }

    /// Column name in the canonical schema
    pub fn column_name(self) -> &'static str {
        match self {
            Measurement::Temperature => "Temp",
            Measurement::Ph => "pH",
            Measurement::MilliVoltsPh => "mV_pH",
            Measurement::Conductivity => "EC",
            Measurement::DissolvedOxygenPercent => "DO_pct",
            Measurement::DissolvedOxygen => "DO_ppm",
            Measurement::Turbidity => "Turbidity",
            Measurement::Other => "Other",
        }
    }

    /// Whether logger readings of this kind feed the median index
    pub fn is_median_tracked(self) -> bool {
        !matches!(self, Measurement::MilliVoltsPh | Measurement::Other)
    }

    /// Agency naming, or `None` when the measurement is not reported
    pub fn regulatory_parameter(self) -> Option<RegulatoryParameter> {
        let (display_name, unit, method) = match self {
            Measurement::Temperature => ("Temperature, water", "deg C", "SM2550B"),
            Measurement::Ph => ("pH", "pH", "SM4500-H+B"),
            Measurement::Conductivity => ("Conductivity", "uS/cm", "SM2510B"),
            Measurement::DissolvedOxygenPercent => {
                ("Dissolved Oxygen Saturation", "%", "SM4500-OG")
            }
            Measurement::DissolvedOxygen => ("Dissolved Oxygen", "mg/L", "SM4500-OG"),
            Measurement::Turbidity => ("Turbidity", "NTU", "SM2130"),
            Measurement::MilliVoltsPh | Measurement::Other => return None,
        };
        Some(RegulatoryParameter {
            display_name,
            unit,
            method,
        })
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Measurement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Measurement::all_values()
            .into_iter()
            .find(|m| m.column_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::data_validation(format!("Unknown measurement '{}'", s)))
    }
}

// =============================================================================
// Canonical Schema
// =============================================================================

/// One column of the canonical schema (excluding Site and RawDataFile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Date,
    Time,
    Reading(Measurement),
    Remarks,
}

impl CanonicalField {
    /// Header text in the summary table
    pub fn column_name(self) -> &'static str {
        match self {
            CanonicalField::Date => "Date",
            CanonicalField::Time => "Time",
            CanonicalField::Reading(measurement) => measurement.column_name(),
            CanonicalField::Remarks => "Remarks",
        }
    }
}

/// Canonical logger columns in output order
pub const LOGGER_FIELDS: [CanonicalField; 11] = [
    CanonicalField::Date,
    CanonicalField::Time,
    CanonicalField::Reading(Measurement::Temperature),
    CanonicalField::Reading(Measurement::Ph),
    CanonicalField::Reading(Measurement::MilliVoltsPh),
    CanonicalField::Reading(Measurement::Conductivity),
    CanonicalField::Reading(Measurement::DissolvedOxygenPercent),
    CanonicalField::Reading(Measurement::DissolvedOxygen),
    CanonicalField::Reading(Measurement::Turbidity),
    CanonicalField::Remarks,
    CanonicalField::Reading(Measurement::Other),
];

/// Canonical temperature export columns in output order
pub const TEMPERATURE_FIELDS: [CanonicalField; 4] = [
    CanonicalField::Date,
    CanonicalField::Time,
    CanonicalField::Reading(Measurement::Temperature),
    CanonicalField::Reading(Measurement::DissolvedOxygen),
];

/// Where a canonical column comes from in a source layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceColumn {
    /// Copied from this zero-based source column
    FromIndex(usize),
    /// Not present in the source; emitted blank
    Synthesized,
}

// =============================================================================
// Cells
// =============================================================================

/// A typed spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    Blank,
    /// Any other cell type, with a description for diagnostics
    Unknown(String),
}

/// Shared blank cell for positions outside a row
pub const BLANK_CELL: &CellValue = &CellValue::Blank;

impl CellValue {
    /// Whether the cell is blank-typed
    ///
    /// Empty text is still text and does not count.
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Render the cell for the summary table
    ///
    /// Dates render as `YYYY-MM-DD`; blank and unknown cells render empty.
    pub fn render(&self) -> String {
        match self {
            CellValue::Number(value) => format_number(*value),
            CellValue::Text(text) => text.clone(),
            CellValue::Date(datetime) => datetime.format("%Y-%m-%d").to_string(),
            CellValue::Blank | CellValue::Unknown(_) => String::new(),
        }
    }

    /// Render the cell for the time column
    pub fn render_time(&self) -> String {
        match self {
            CellValue::Date(datetime) => datetime.format("%H:%M:%S").to_string(),
            other => other.render(),
        }
    }

    /// Calendar date held by the cell, parsing text in the accepted formats
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(datetime) => Some(datetime.date()),
            CellValue::Text(text) => crate::constants::TEXT_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text.trim(), fmt).ok()),
            _ => None,
        }
    }

    /// Time of day held by the cell, parsing text in the accepted formats
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            CellValue::Date(datetime) => Some(datetime.time()),
            CellValue::Text(text) => crate::constants::TEXT_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveTime::parse_from_str(text.trim(), fmt).ok()),
            _ => None,
        }
    }
}

/// Format a number the way the historical summaries did
///
/// Whole numbers keep one decimal place (`12.0`); other values use the
/// shortest representation that round-trips.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

// =============================================================================
// Rows and Readings
// =============================================================================

/// One numeric reading bound for the aggregation index
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub site: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub measurement: Measurement,
    /// `None` when the source cell was missing
    pub value: Option<f64>,
    pub source_file: String,
}

/// One normalized output row
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    /// Canonical site identifier
    pub site: String,
    /// Source file name
    pub raw_data_file: String,
    /// Rendered values in canonical field order
    pub fields: Vec<String>,
}

impl CanonicalRow {
    /// Complete CSV record including Site and RawDataFile
    pub fn to_record(&self) -> Vec<&str> {
        let mut record = Vec::with_capacity(self.fields.len() + 2);
        record.push(self.site.as_str());
        record.push(self.raw_data_file.as_str());
        record.extend(self.fields.iter().map(String::as_str));
        record
    }
}

// =============================================================================
// Site Metadata
// =============================================================================

/// Date range and record count contributed by one file for one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    pub source_file: PathBuf,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
    pub record_count: usize,
}

impl SiteMetadata {
    /// Create empty metadata for a source file
    pub fn new(source_file: PathBuf) -> Self {
        Self {
            source_file,
            earliest_date: None,
            latest_date: None,
            record_count: 0,
        }
    }

    /// Count one emitted record, widening the date range when a date is known
    pub fn observe(&mut self, date: Option<NaiveDate>) {
        self.record_count += 1;
        if let Some(date) = date {
            self.earliest_date = Some(self.earliest_date.map_or(date, |d| d.min(date)));
            self.latest_date = Some(self.latest_date.map_or(date, |d| d.max(date)));
        }
    }
}

// =============================================================================
// Status Events
// =============================================================================

/// Progress events sent from the pipeline worker to the control surface
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// Processing of a file has begun
    FileStarted { index: usize, total: usize, file: String },
    /// A file was processed and contributed this many rows
    FileCompleted { file: String, rows: usize },
    /// A file was rejected; the run continues
    FileRejected { file: String, reason: String },
    /// Free-form progress message
    Message(String),
    /// Terminal sentinel; nothing follows it
    Finished { success: bool },
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::FileStarted { index, total, file } => {
                write!(f, "[{}/{}] Processing {}", index, total, file)
            }
            StatusEvent::FileCompleted { file, rows } => {
                write!(f, "Finished {} ({} rows)", file, rows)
            }
            StatusEvent::FileRejected { file, reason } => {
                write!(f, "Skipped {}: {}", file, reason)
            }
            StatusEvent::Message(message) => f.write_str(message),
            StatusEvent::Finished { success: true } => write!(f, "Processing complete"),
            StatusEvent::Finished { success: false } => {
                write!(f, "Processing complete; some files failed")
            }
        }
    }
}
