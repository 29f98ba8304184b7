//! Workbook loading
//!
//! Reads every sheet of a legacy binary workbook into an owned grid of typed
//! cells. Grid coordinates are absolute sheet positions, so cell `(18, 1)` is
//! B19 no matter where the sheet's used range begins.

use super::cells::cell_value;
use crate::app::models::{BLANK_CELL, CellValue};
use crate::{Error, Result};
use calamine::{Reader, Xls, open_workbook};
use std::path::Path;
use tracing::debug;

/// One sheet as rows of typed cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cell at an absolute position; outside the grid reads as blank
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(BLANK_CELL)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// All sheets of a workbook in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

/// Open a workbook and load every sheet
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let file = file_label(path);
    let mut workbook: Xls<_> = open_workbook(path)
        .map_err(|e: calamine::XlsError| Error::workbook(&file, e.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| Error::workbook(&file, format!("sheet '{}': {}", name, e)))?;

        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row];
        for source_row in range.rows() {
            let mut row = vec![CellValue::Blank; start_col];
            row.extend(source_row.iter().map(cell_value));
            rows.push(row);
        }

        debug!("Loaded sheet '{}' from {} ({} rows)", name, file, rows.len());
        sheets.push(Worksheet::new(name, rows));
    }

    Ok(Workbook { sheets })
}

/// File name used in messages and the RawDataFile column
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
