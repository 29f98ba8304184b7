//! Synthetic workbooks for layout and emission tests

use crate::app::models::CellValue;
use crate::app::services::workbook::{Workbook, Worksheet};
use chrono::{NaiveDate, NaiveDateTime};

mod cells_tests;
mod reconciler_tests;

pub fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

pub fn num(value: f64) -> CellValue {
    CellValue::Number(value)
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> CellValue {
    CellValue::Date(timestamp(y, m, d, h, min, s))
}

pub fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// Summary sheet with the site label in B19
pub fn summary_sheet(site: &str) -> Worksheet {
    let mut rows = vec![Vec::new(); 18];
    rows.push(vec![text("Site"), text(site)]);
    Worksheet::new("Summary", rows)
}

pub fn header(columns: &[&str]) -> Vec<CellValue> {
    columns.iter().map(|c| text(c)).collect()
}

pub const OXYGEN_FIRST_HEADER: [&str; 9] = [
    "Date", "Time", "Temp.[C]", "pH", "D.O.[%]", "D.O.[ppm]", "EC[uS/cm]", "Turb.FNU", "Remarks",
];

pub const MILLIVOLTS_HEADER: [&str; 11] = [
    "Date", "Time", "Temp.[C]", "pH", "mV[pH]", "EC[uS/cm]", "D.O.[%]", "D.O.[ppm]", "Turb.FNU",
    "Remarks", "Other",
];

pub const CONDUCTIVITY_FIRST_HEADER: [&str; 9] = [
    "Date", "Time", "Temp.[C]", "pH", "EC[uS/cm]", "D.O.[%]", "D.O.[ppm]", "Turb.FNU", "Remarks",
];

/// One logical reading in canonical terms, permuted into each layout below
pub struct Sample {
    pub date: CellValue,
    pub time: CellValue,
    pub temp: CellValue,
    pub ph: CellValue,
    pub ec: CellValue,
    pub do_pct: CellValue,
    pub do_ppm: CellValue,
    pub turbidity: CellValue,
    pub remarks: CellValue,
}

pub fn samples() -> Vec<Sample> {
    vec![
        Sample {
            date: datetime(2017, 6, 29, 0, 0, 0),
            time: datetime(1899, 12, 30, 10, 15, 0),
            temp: num(14.5),
            ph: num(7.0),
            ec: num(312.0),
            do_pct: num(98.5),
            do_ppm: num(9.75),
            turbidity: num(2.25),
            remarks: text("clear"),
        },
        Sample {
            date: datetime(2017, 6, 29, 0, 0, 0),
            time: datetime(1899, 12, 30, 10, 30, 0),
            temp: num(15.5),
            ph: num(7.25),
            ec: num(318.0),
            do_pct: num(97.0),
            do_ppm: num(9.5),
            turbidity: text("n/a"),
            remarks: CellValue::Blank,
        },
        Sample {
            date: datetime(2017, 6, 30, 0, 0, 0),
            time: datetime(1899, 12, 30, 9, 0, 0),
            temp: num(13.0),
            ph: num(7.5),
            ec: num(300.0),
            do_pct: num(101.0),
            do_ppm: num(10.25),
            turbidity: num(3.0),
            remarks: CellValue::Blank,
        },
    ]
}

pub fn oxygen_first_row(s: &Sample) -> Vec<CellValue> {
    vec![
        s.date.clone(),
        s.time.clone(),
        s.temp.clone(),
        s.ph.clone(),
        s.do_pct.clone(),
        s.do_ppm.clone(),
        s.ec.clone(),
        s.turbidity.clone(),
        s.remarks.clone(),
    ]
}

pub fn millivolts_row(s: &Sample) -> Vec<CellValue> {
    vec![
        s.date.clone(),
        s.time.clone(),
        s.temp.clone(),
        s.ph.clone(),
        CellValue::Blank,
        s.ec.clone(),
        s.do_pct.clone(),
        s.do_ppm.clone(),
        s.turbidity.clone(),
        s.remarks.clone(),
        CellValue::Blank,
    ]
}

pub fn conductivity_first_row(s: &Sample) -> Vec<CellValue> {
    vec![
        s.date.clone(),
        s.time.clone(),
        s.temp.clone(),
        s.ph.clone(),
        s.ec.clone(),
        s.do_pct.clone(),
        s.do_ppm.clone(),
        s.turbidity.clone(),
        s.remarks.clone(),
    ]
}

/// Build a two-sheet workbook from a header and data rows
pub fn workbook(site: &str, header_row: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Workbook {
    let mut data = vec![header_row];
    data.extend(rows);
    Workbook {
        sheets: vec![summary_sheet(site), Worksheet::new("Data", data)],
    }
}
