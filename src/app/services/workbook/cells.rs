//! Spreadsheet cell typing
//!
//! Converts reader cells into [`CellValue`]. Date-time serials are resolved by
//! the reader against the workbook's own date system (1900 or 1904).

use crate::app::models::CellValue;
use calamine::{Data, ExcelDateTime};
use chrono::{NaiveDate, NaiveDateTime, SubsecRound};

/// Resolve a date-time serial, rounded to the nearest second
pub fn serial_to_datetime(serial: &ExcelDateTime) -> Option<NaiveDateTime> {
    let value = serial.as_f64();
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    serial.as_datetime().map(|datetime| datetime.round_subsecs(0))
}

/// Parse an ISO date-time string produced by the reader
fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Map a reader cell onto the closed cell type
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::String(text) => CellValue::Text(text.clone()),
        Data::DateTime(datetime) if datetime.is_datetime() => {
            match serial_to_datetime(datetime) {
                Some(value) => CellValue::Date(value),
                None => CellValue::Unknown(format!("date serial {}", datetime.as_f64())),
            }
        }
        Data::DateTime(duration) => CellValue::Unknown(format!("duration {}", duration.as_f64())),
        Data::DateTimeIso(text) => match parse_iso_datetime(text) {
            Some(value) => CellValue::Date(value),
            None => CellValue::Unknown(format!("date text '{}'", text)),
        },
        Data::DurationIso(text) => CellValue::Unknown(format!("duration '{}'", text)),
        Data::Bool(value) => CellValue::Unknown(format!("boolean {}", value)),
        Data::Error(error) => CellValue::Unknown(format!("error {:?}", error)),
        Data::Empty => CellValue::Blank,
    }
}
