//! Temperature export normalization
//!
//! Reads the banner for the site, checks the header, then streams the data
//! rows into canonical rows and readings. Logger event rows with no
//! measurements are skipped quietly; rows that cannot be parsed are reported
//! to the diagnostic log and skipped. Text is decoded lossily so a stray
//! single-byte `°` never rejects a file.

use super::banner::site_name_from_banner;
use super::reconciler::TemperatureLayout;
use crate::app::models::{CanonicalRow, Measurement, RawReading, SiteMetadata};
use crate::app::services::pipeline::context::{FileContext, FileOutcome};
use crate::app::services::workbook::reader::file_label;
use crate::constants::temperature::{DATETIME_COLUMN, DATETIME_FORMATS, HEADER_ROWS};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Parse a reading timestamp in any of the logger formats
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

/// Read and normalize a temperature export from disk
pub fn process_temperature_file(path: &Path, ctx: &mut FileContext<'_>) -> Result<FileOutcome> {
    let file = File::open(path).map_err(|e| {
        Error::csv_parsing(file_label(path), format!("cannot open file: {}", e), None)
    })?;
    process_temperature_csv(file, path, ctx)
}

/// Normalize a temperature export from any reader
pub fn process_temperature_csv<R: Read>(
    source: R,
    path: &Path,
    ctx: &mut FileContext<'_>,
) -> Result<FileOutcome> {
    let file = file_label(path);
    let mut reader = BufReader::new(source);

    let mut banner = Vec::new();
    reader
        .read_until(b'\n', &mut banner)
        .map_err(|e| Error::csv_parsing(&file, format!("cannot read banner: {}", e), None))?;
    let raw_site = site_name_from_banner(&String::from_utf8_lossy(&banner), &file)?;
    let site = ctx.resolver.resolve_temperature(&raw_site, &file)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.byte_records();

    let header = match records.next() {
        Some(record) => StringRecord::from_byte_record_lossy(
            record.map_err(|e| Error::csv_parsing(&file, "cannot read header row", Some(e)))?,
        ),
        None => return Err(Error::structural_format(&file, "missing header row")),
    };
    let layout = TemperatureLayout::detect(&header, &file)?;

    info!("Temperature export {} reports site {} ({:?})", file, site, layout);

    let mut outcome = FileOutcome::new(site.clone(), SiteMetadata::new(path.to_path_buf()));

    for (offset, record) in records.enumerate() {
        let row_number = offset + HEADER_ROWS + 1;
        let record = StringRecord::from_byte_record_lossy(
            record.map_err(|e| Error::csv_parsing(&file, format!("row {}", row_number), Some(e)))?,
        );

        let cell = |column: usize| record.get(column).unwrap_or("").trim();
        let columns = layout.measurement_columns();

        if columns.iter().all(|(_, column)| cell(*column).is_empty()) {
            outcome.blank_rows_skipped += 1;
            continue;
        }

        let Some(timestamp) = parse_datetime(cell(DATETIME_COLUMN)) else {
            ctx.diagnostics.diagnostic(&format!(
                "Row {}: unparseable date-time '{}'",
                row_number,
                cell(DATETIME_COLUMN)
            ))?;
            continue;
        };

        let mut values: Vec<(Measurement, &str, Option<f64>)> = Vec::with_capacity(columns.len());
        let mut malformed = None;
        for (measurement, column) in columns {
            let text = cell(*column);
            if text.is_empty() {
                values.push((*measurement, text, None));
                continue;
            }
            match text.parse::<f64>() {
                Ok(value) => values.push((*measurement, text, Some(value))),
                Err(_) => {
                    malformed = Some((*measurement, text));
                    break;
                }
            }
        }
        if let Some((measurement, text)) = malformed {
            ctx.diagnostics.diagnostic(&format!(
                "Row {}: unparseable {} value '{}'",
                row_number, measurement, text
            ))?;
            continue;
        }

        let rendered = |wanted: Measurement| {
            values
                .iter()
                .find(|(m, _, _)| *m == wanted)
                .map(|(_, text, _)| text.to_string())
                .unwrap_or_default()
        };
        ctx.rows.write_row(&CanonicalRow {
            site: site.clone(),
            raw_data_file: file.clone(),
            fields: vec![
                timestamp.format("%Y-%m-%d").to_string(),
                timestamp.format("%H:%M:%S").to_string(),
                rendered(Measurement::Temperature),
                rendered(Measurement::DissolvedOxygen),
            ],
        })?;
        outcome.rows_written += 1;
        outcome.metadata.observe(Some(timestamp.date()));

        for (measurement, _, value) in &values {
            let reading = RawReading {
                site: site.clone(),
                date: timestamp.date(),
                time: Some(timestamp.time()),
                measurement: *measurement,
                value: *value,
                source_file: file.clone(),
            };
            if ctx.index.record(&reading) {
                outcome.readings_recorded += 1;
            }
            if let Some(sink) = ctx.readings.as_deref_mut() {
                sink.write_reading(&reading)?;
            }
        }
    }

    debug!(
        "{}: {} rows written, {} event rows skipped",
        file, outcome.rows_written, outcome.blank_rows_skipped
    );

    Ok(outcome)
}
