//! Workbook structure checks and layout detection
//!
//! A logger workbook has exactly two sheets: a summary sheet with the site
//! label in B19 and a data sheet whose header row starts with `Date`. The
//! probe firmware has written three column orders over the years; the header
//! text in columns 4 and 5 tells them apart.

use super::reader::{Workbook, Worksheet};
use crate::app::models::{CellValue, SourceColumn};
use crate::constants::workbook::{
    DATA_HEADER_FIRST_CELL, OXYGEN_PERCENT_HEADER, PH_MILLIVOLT_HEADER, REQUIRED_SHEET_COUNT,
    SITE_CELL,
};
use crate::{Error, Result};

use SourceColumn::{FromIndex, Synthesized};

/// Column orders produced by the logger software
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookLayout {
    /// Date, Time, Temp, pH, D.O.[%], D.O.[ppm], EC, Turbidity, Remarks
    OxygenBeforeConductivity,
    /// Date, Time, Temp, pH, mV[pH], EC, D.O.[%], D.O.[ppm], Turbidity, Remarks, Other
    MillivoltsIncluded,
    /// Date, Time, Temp, pH, EC, D.O.[%], D.O.[ppm], Turbidity, Remarks
    ConductivityBeforeOxygen,
}

impl WorkbookLayout {
    /// Detect the layout from the data sheet header row
    ///
    /// Probes run in a fixed order and compare trimmed header text.
    pub fn detect(header: &[CellValue]) -> Option<Self> {
        let header_is = |column: usize, expected: &str| {
            matches!(header.get(column), Some(CellValue::Text(text)) if text.trim() == expected)
        };

        if header_is(4, OXYGEN_PERCENT_HEADER) {
            Some(WorkbookLayout::OxygenBeforeConductivity)
        } else if header_is(4, PH_MILLIVOLT_HEADER) {
            Some(WorkbookLayout::MillivoltsIncluded)
        } else if header_is(5, OXYGEN_PERCENT_HEADER) {
            Some(WorkbookLayout::ConductivityBeforeOxygen)
        } else {
            None
        }
    }

    /// Source column for each canonical logger field, in canonical order
    ///
    /// Canonical order: Date, Time, Temp, pH, mV_pH, EC, DO_pct, DO_ppm,
    /// Turbidity, Remarks, Other.
    pub fn column_plan(self) -> [SourceColumn; 11] {
        match self {
            WorkbookLayout::OxygenBeforeConductivity => [
                FromIndex(0),
                FromIndex(1),
                FromIndex(2),
                FromIndex(3),
                Synthesized,
                FromIndex(6),
                FromIndex(4),
                FromIndex(5),
                FromIndex(7),
                FromIndex(8),
                Synthesized,
            ],
            WorkbookLayout::MillivoltsIncluded => [
                FromIndex(0),
                FromIndex(1),
                FromIndex(2),
                FromIndex(3),
                FromIndex(4),
                FromIndex(5),
                FromIndex(6),
                FromIndex(7),
                FromIndex(8),
                FromIndex(9),
                FromIndex(10),
            ],
            WorkbookLayout::ConductivityBeforeOxygen => [
                FromIndex(0),
                FromIndex(1),
                FromIndex(2),
                FromIndex(3),
                Synthesized,
                FromIndex(4),
                FromIndex(5),
                FromIndex(6),
                FromIndex(7),
                FromIndex(8),
                Synthesized,
            ],
        }
    }
}

/// A workbook that passed the structural checks
#[derive(Debug)]
pub struct ReconciledWorkbook<'a> {
    /// Site label exactly as typed in B19
    pub site_label: String,
    pub layout: WorkbookLayout,
    pub data_sheet: &'a Worksheet,
}

/// Check the workbook structure and select its column plan
pub fn reconcile<'a>(workbook: &'a Workbook, file: &str) -> Result<ReconciledWorkbook<'a>> {
    if workbook.sheets.len() != REQUIRED_SHEET_COUNT {
        return Err(Error::structural_format(
            file,
            format!(
                "expected {} sheets, found {}",
                REQUIRED_SHEET_COUNT,
                workbook.sheets.len()
            ),
        ));
    }

    let summary_sheet = &workbook.sheets[0];
    let data_sheet = &workbook.sheets[1];

    let site_label = match summary_sheet.cell(SITE_CELL.0, SITE_CELL.1) {
        CellValue::Text(text) if !text.trim().is_empty() => text.clone(),
        other => {
            return Err(Error::structural_format(
                file,
                format!("site name cell B19 does not hold text ({:?})", other),
            ));
        }
    };

    match data_sheet.cell(0, 0) {
        CellValue::Text(text) if text.trim() == DATA_HEADER_FIRST_CELL => {}
        other => {
            return Err(Error::structural_format(
                file,
                format!(
                    "data sheet header must start with '{}' ({:?})",
                    DATA_HEADER_FIRST_CELL, other
                ),
            ));
        }
    }

    let header = data_sheet.rows.first().map(Vec::as_slice).unwrap_or(&[]);
    let layout = WorkbookLayout::detect(header).ok_or_else(|| {
        Error::structural_format(file, "header signature not recognized")
    })?;

    Ok(ReconciledWorkbook {
        site_label,
        layout,
        data_sheet,
    })
}
