//! Regulatory export writers
//!
//! Every row follows the agency's fixed 58-column template with a handful of
//! fields populated. Medians from logger runs go to a single export; temperature
//! runs write one export per site with a row per reading.

use super::ReadingSink;
use crate::app::models::{Measurement, RawReading, format_number};
use crate::app::services::aggregation::{MedianRow, MedianSink};
use crate::config::RegulatoryConfig;
use crate::constants::{TEMPERATURE_EXPORT_SUFFIX, regulatory};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Render one template row, or `None` for measurements the agency does not take
pub fn render_regulatory_row(
    config: &RegulatoryConfig,
    site: &str,
    date: NaiveDate,
    time: Option<NaiveTime>,
    measurement: Measurement,
    value: f64,
    comment: &str,
) -> Option<Vec<String>> {
    let parameter = measurement.regulatory_parameter()?;

    let mut row = vec![String::new(); regulatory::COLUMNS.len()];
    row[regulatory::STUDY_ID] = config.study_id.clone();
    row[regulatory::LOCATION_ID] = site.to_string();
    row[regulatory::FIELD_COLLECTION_TYPE] = regulatory::COLLECTION_TYPE_VALUE.to_string();
    row[regulatory::FIELD_COLLECTOR] = config.field_collector.clone();
    row[regulatory::START_DATE] = date.format(regulatory::DATE_FORMAT).to_string();
    row[regulatory::START_TIME] = time
        .map(|t| t.format(regulatory::TIME_FORMAT).to_string())
        .unwrap_or_default();
    row[regulatory::FIELD_COLLECTION_COMMENT] = comment.to_string();
    row[regulatory::PARAMETER_NAME] = parameter.display_name.to_string();
    row[regulatory::RESULT_VALUE] = format_number(value);
    row[regulatory::RESULT_UNITS] = parameter.unit.to_string();
    row[regulatory::RESULT_METHOD] = parameter.method.to_string();
    row[regulatory::SAMPLE_MATRIX] = regulatory::SAMPLE_MATRIX_VALUE.to_string();
    row[regulatory::SAMPLE_SOURCE] = regulatory::SAMPLE_SOURCE_VALUE.to_string();
    Some(row)
}

/// CSV writer for the agency template
pub struct RegulatoryWriter<W: Write> {
    writer: csv::Writer<W>,
    config: RegulatoryConfig,
    label: String,
    rows_written: usize,
}

impl<W: Write> RegulatoryWriter<W> {
    /// Create a writer and emit the template header
    pub fn new(inner: W, config: RegulatoryConfig, label: impl Into<String>) -> Result<Self> {
        let mut export = Self {
            writer: csv::Writer::from_writer(inner),
            config,
            label: label.into(),
            rows_written: 0,
        };
        export
            .writer
            .write_record(regulatory::COLUMNS)
            .map_err(|e| export.sink_error(e))?;
        Ok(export)
    }

    fn sink_error(&self, error: impl std::fmt::Display) -> Error {
        Error::output_sink(&self.label, error.to_string(), None)
    }

    /// Write one row; returns false when the measurement is not exported
    pub fn write(
        &mut self,
        site: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
        measurement: Measurement,
        value: f64,
        comment: &str,
    ) -> Result<bool> {
        let Some(row) =
            render_regulatory_row(&self.config, site, date, time, measurement, value, comment)
        else {
            return Ok(false);
        };
        self.writer
            .write_record(&row)
            .map_err(|e| self.sink_error(e))?;
        self.rows_written += 1;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.sink_error(e))
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        let label = self.label.clone();
        self.writer
            .into_inner()
            .map_err(|e| Error::output_sink(label, e.to_string(), None))
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl<W: Write> MedianSink for RegulatoryWriter<W> {
    fn write_median(&mut self, row: &MedianRow) -> Result<()> {
        self.write(
            &row.site,
            row.date,
            row.time,
            row.measurement,
            row.median,
            regulatory::MEDIAN_COMMENT,
        )?;
        Ok(())
    }
}

impl<W: Write> ReadingSink for RegulatoryWriter<W> {
    fn write_reading(&mut self, reading: &RawReading) -> Result<()> {
        if let Some(value) = reading.value {
            self.write(
                &reading.site,
                reading.date,
                reading.time,
                reading.measurement,
                value,
                "",
            )?;
        }
        Ok(())
    }
}

/// Per-site temperature exports, opened on first reading for a site
///
/// Writers stay open for the whole run and are flushed by [`finish`].
///
/// [`finish`]: TemperatureExports::finish
pub struct TemperatureExports {
    output_dir: PathBuf,
    config: RegulatoryConfig,
    writers: BTreeMap<String, RegulatoryWriter<BufWriter<File>>>,
}

impl TemperatureExports {
    pub fn new(output_dir: &Path, config: RegulatoryConfig) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            config,
            writers: BTreeMap::new(),
        }
    }

    /// Export path for a site
    pub fn path_for(&self, site: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", site, TEMPERATURE_EXPORT_SUFFIX))
    }

    fn writer_for(&mut self, site: &str) -> Result<&mut RegulatoryWriter<BufWriter<File>>> {
        if !self.writers.contains_key(site) {
            let path = self.path_for(site);
            let file = File::create(&path).map_err(|e| {
                Error::output_sink(path.display().to_string(), "cannot create file", Some(e))
            })?;
            info!("Writing temperature export for {} to {}", site, path.display());
            let writer = RegulatoryWriter::new(
                BufWriter::new(file),
                self.config.clone(),
                path.display().to_string(),
            )?;
            self.writers.insert(site.to_string(), writer);
        }
        self.writers
            .get_mut(site)
            .ok_or_else(|| Error::output_sink(site, "export writer missing", None))
    }

    /// Total rows across all site exports
    pub fn rows_written(&self) -> usize {
        self.writers.values().map(RegulatoryWriter::rows_written).sum()
    }

    /// Flush and close every site export; returns the number of files
    pub fn finish(self) -> Result<usize> {
        let count = self.writers.len();
        for (site, writer) in self.writers {
            let mut inner = writer.into_inner()?;
            inner.flush().map_err(|e| {
                Error::output_sink(format!("{} export", site), "flush failed", Some(e))
            })?;
        }
        debug!("Closed {} temperature exports", count);
        Ok(count)
    }
}

impl ReadingSink for TemperatureExports {
    fn write_reading(&mut self, reading: &RawReading) -> Result<()> {
        if reading.value.is_none() || reading.measurement.regulatory_parameter().is_none() {
            return Ok(());
        }
        self.writer_for(&reading.site)?.write_reading(reading)
    }
}
