//! Canonical row emission for logger workbooks
//!
//! Rows are written to the summary sink as they are read and never retained.
//! Median-tracked readings from rows with a usable date are fed into the
//! aggregation index on the way through.

use super::reader::{Workbook, file_label, read_workbook};
use super::reconciler::reconcile;
use crate::Result;
use crate::app::models::{
    BLANK_CELL, CanonicalField, CanonicalRow, CellValue, LOGGER_FIELDS, SiteMetadata, SourceColumn,
};
use crate::app::services::pipeline::context::{FileContext, FileOutcome};
use crate::constants::workbook::{DATE_COLUMN, TIME_COLUMN};
use std::path::Path;
use tracing::{debug, info};

/// Read and normalize a logger workbook from disk
pub fn process_workbook_file(path: &Path, ctx: &mut FileContext<'_>) -> Result<FileOutcome> {
    let workbook = read_workbook(path)?;
    process_workbook(&workbook, path, ctx)
}

/// Normalize a loaded workbook into canonical rows and readings
pub fn process_workbook(
    workbook: &Workbook,
    path: &Path,
    ctx: &mut FileContext<'_>,
) -> Result<FileOutcome> {
    let file = file_label(path);
    let reconciled = reconcile(workbook, &file)?;
    let site = ctx.resolver.resolve_logger(&reconciled.site_label);
    let plan = reconciled.layout.column_plan();

    info!(
        "Workbook {} reports site {} ({:?} layout)",
        file, site, reconciled.layout
    );

    let mut outcome = FileOutcome::new(site.clone(), SiteMetadata::new(path.to_path_buf()));

    for (row_index, row) in reconciled.data_sheet.rows.iter().enumerate().skip(1) {
        if row.iter().skip(1).all(CellValue::is_blank) {
            outcome.blank_rows_skipped += 1;
            continue;
        }

        let row_date = row.get(DATE_COLUMN).and_then(CellValue::as_date);
        let row_time = row.get(TIME_COLUMN).and_then(CellValue::as_time);

        let mut fields = Vec::with_capacity(LOGGER_FIELDS.len());
        for (field, source) in LOGGER_FIELDS.iter().zip(plan) {
            let cell = match source {
                SourceColumn::FromIndex(column) => {
                    let cell = row.get(column).unwrap_or(BLANK_CELL);
                    if let CellValue::Unknown(description) = cell {
                        outcome.unknown_cells += 1;
                        ctx.diagnostics.diagnostic(&format!(
                            "Unknown cell type at [{},{}]: {}",
                            row_index, column, description
                        ))?;
                    }
                    cell
                }
                SourceColumn::Synthesized => BLANK_CELL,
            };

            fields.push(match field {
                CanonicalField::Time => cell.render_time(),
                _ => cell.render(),
            });

            if let (CanonicalField::Reading(measurement), Some(date)) = (field, row_date) {
                if !measurement.is_median_tracked() {
                    continue;
                }
                let value = match cell {
                    CellValue::Number(value) => Some(*value),
                    CellValue::Text(_) => Some(0.0),
                    _ => None,
                };
                if let Some(value) = value {
                    if ctx.index.add_measurement(&site, date, row_time, *measurement, value) {
                        outcome.readings_recorded += 1;
                    }
                }
            }
        }

        ctx.rows.write_row(&CanonicalRow {
            site: site.clone(),
            raw_data_file: file.clone(),
            fields,
        })?;
        outcome.metadata.observe(row_date);
        outcome.rows_written += 1;
    }

    debug!(
        "{}: {} rows written, {} blank rows skipped, {} readings recorded",
        file, outcome.rows_written, outcome.blank_rows_skipped, outcome.readings_recorded
    );

    Ok(outcome)
}
