use super::timestamp;
use crate::app::models::CellValue;
use crate::app::services::workbook::cells::{cell_value, serial_to_datetime};
use calamine::{Data, ExcelDateTime, ExcelDateTimeType};

fn serial(value: f64) -> ExcelDateTime {
    ExcelDateTime::new(value, ExcelDateTimeType::DateTime, false)
}

#[test]
fn test_serial_conversion() {
    assert_eq!(serial_to_datetime(&serial(42915.0)), Some(timestamp(2017, 6, 29, 0, 0, 0)));
    assert_eq!(serial_to_datetime(&serial(42915.5)), Some(timestamp(2017, 6, 29, 12, 0, 0)));
    assert_eq!(serial_to_datetime(&serial(-1.0)), None);
    assert_eq!(serial_to_datetime(&serial(f64::NAN)), None);

    // Time-only serials keep their time of day
    let time = serial_to_datetime(&serial(0.4375)).unwrap();
    assert_eq!(time.time(), timestamp(2017, 1, 1, 10, 30, 0).time());
}

#[test]
fn test_serials_round_to_the_second() {
    // 06:15:00 stored with float noise
    let noisy = serial(42915.0 + 22_499.9996 / 86_400.0);
    assert_eq!(serial_to_datetime(&noisy), Some(timestamp(2017, 6, 29, 6, 15, 0)));
}

#[test]
fn test_1904_date_system_serials() {
    let serial_1904 = ExcelDateTime::new(41453.0, ExcelDateTimeType::DateTime, true);
    assert_eq!(
        cell_value(&Data::DateTime(serial_1904)),
        CellValue::Date(timestamp(2017, 6, 29, 0, 0, 0))
    );
    assert_eq!(
        cell_value(&Data::DateTime(serial(42915.0))),
        CellValue::Date(timestamp(2017, 6, 29, 0, 0, 0))
    );
}

#[test]
fn test_duration_cells_are_unknown() {
    let duration = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
    assert!(matches!(cell_value(&Data::DateTime(duration)), CellValue::Unknown(_)));
}

#[test]
fn test_cell_typing() {
    assert_eq!(cell_value(&Data::Int(12)), CellValue::Number(12.0));
    assert_eq!(cell_value(&Data::Float(7.25)), CellValue::Number(7.25));
    assert_eq!(
        cell_value(&Data::String("GC1".to_string())),
        CellValue::Text("GC1".to_string())
    );
    assert_eq!(cell_value(&Data::Empty), CellValue::Blank);
    assert!(matches!(cell_value(&Data::Bool(true)), CellValue::Unknown(_)));
    assert!(matches!(
        cell_value(&Data::DurationIso("PT1H".to_string())),
        CellValue::Unknown(_)
    ));
}

#[test]
fn test_iso_date_cells() {
    assert_eq!(
        cell_value(&Data::DateTimeIso("2017-06-29T06:00:00".to_string())),
        CellValue::Date(timestamp(2017, 6, 29, 6, 0, 0))
    );
    assert_eq!(
        cell_value(&Data::DateTimeIso("2017-06-29".to_string())),
        CellValue::Date(timestamp(2017, 6, 29, 0, 0, 0))
    );
    assert!(matches!(
        cell_value(&Data::DateTimeIso("garbage".to_string())),
        CellValue::Unknown(_)
    ));
}
