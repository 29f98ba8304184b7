use super::*;
use crate::Error;
use crate::app::models::SourceColumn;
use crate::app::services::workbook::{Workbook, WorkbookLayout, Worksheet, reconcile};

#[test]
fn test_each_signature_selects_its_layout() {
    assert_eq!(
        WorkbookLayout::detect(&header(&OXYGEN_FIRST_HEADER)),
        Some(WorkbookLayout::OxygenBeforeConductivity)
    );
    assert_eq!(
        WorkbookLayout::detect(&header(&MILLIVOLTS_HEADER)),
        Some(WorkbookLayout::MillivoltsIncluded)
    );
    assert_eq!(
        WorkbookLayout::detect(&header(&CONDUCTIVITY_FIRST_HEADER)),
        Some(WorkbookLayout::ConductivityBeforeOxygen)
    );
}

#[test]
fn test_header_text_is_trimmed() {
    let mut columns = CONDUCTIVITY_FIRST_HEADER.to_vec();
    columns[5] = " D.O.[%] ";
    assert_eq!(
        WorkbookLayout::detect(&header(&columns)),
        Some(WorkbookLayout::ConductivityBeforeOxygen)
    );
}

#[test]
fn test_unknown_signature_is_structural_error() {
    let columns = ["Date", "Time", "Temp", "pH", "ORP", "Depth", "EC"];
    assert_eq!(WorkbookLayout::detect(&header(&columns)), None);

    let book = workbook("GC1", header(&columns), vec![]);
    let error = reconcile(&book, "LOG7.xls").unwrap_err();
    assert!(matches!(error, Error::StructuralFormat { .. }));
    assert_eq!(
        error.to_string(),
        "Unrecognized format in 'LOG7.xls': header signature not recognized"
    );
}

#[test]
fn test_plans_cover_canonical_positions() {
    let plan = WorkbookLayout::OxygenBeforeConductivity.column_plan();
    assert_eq!(plan[4], SourceColumn::Synthesized);
    assert_eq!(plan[5], SourceColumn::FromIndex(6));
    assert_eq!(plan[10], SourceColumn::Synthesized);

    let plan = WorkbookLayout::MillivoltsIncluded.column_plan();
    assert!(plan.iter().all(|c| *c != SourceColumn::Synthesized));

    let plan = WorkbookLayout::ConductivityBeforeOxygen.column_plan();
    assert_eq!(plan[5], SourceColumn::FromIndex(4));
    assert_eq!(plan[6], SourceColumn::FromIndex(5));
}

#[test]
fn test_sheet_count_must_be_two() {
    let mut book = workbook("GC1", header(&OXYGEN_FIRST_HEADER), vec![]);
    book.sheets.push(Worksheet::new("Extra", vec![]));
    assert!(matches!(
        reconcile(&book, "LOG1.xls"),
        Err(Error::StructuralFormat { .. })
    ));

    let single = Workbook {
        sheets: vec![summary_sheet("GC1")],
    };
    assert!(matches!(
        reconcile(&single, "LOG1.xls"),
        Err(Error::StructuralFormat { .. })
    ));
}

#[test]
fn test_site_cell_must_be_text() {
    let mut book = workbook("GC1", header(&OXYGEN_FIRST_HEADER), vec![]);
    book.sheets[0].rows[18][1] = num(1.0);
    assert!(matches!(
        reconcile(&book, "LOG1.xls"),
        Err(Error::StructuralFormat { .. })
    ));

    book.sheets[0].rows[18].truncate(1);
    assert!(reconcile(&book, "LOG1.xls").is_err());
}

#[test]
fn test_data_sheet_must_start_with_date() {
    let mut columns = OXYGEN_FIRST_HEADER.to_vec();
    columns[0] = "Timestamp";
    let book = workbook("GC1", header(&columns), vec![]);
    assert!(matches!(
        reconcile(&book, "LOG1.xls"),
        Err(Error::StructuralFormat { .. })
    ));
}

#[test]
fn test_reconciled_workbook_keeps_raw_site_label() {
    let book = workbook(" Garison 1 ", header(&OXYGEN_FIRST_HEADER), vec![]);
    let reconciled = reconcile(&book, "LOG1.xls").unwrap();
    assert_eq!(reconciled.site_label, " Garison 1 ");
    assert_eq!(reconciled.layout, WorkbookLayout::OxygenBeforeConductivity);
}
