use super::{date, lines};
use crate::app::models::{CanonicalRow, InstrumentMode, Measurement};
use crate::app::services::aggregation::AggregationIndex;
use crate::app::services::output_writer::{RowSink, SummaryWriter};

#[test]
fn test_summary_layout_with_median_section() {
    let mut writer = SummaryWriter::new(Vec::new(), InstrumentMode::Temperature, "mem").unwrap();
    writer
        .write_row(&CanonicalRow {
            site: "GARRISON-01".to_string(),
            raw_data_file: "garrison.csv".to_string(),
            fields: vec![
                "2017-06-29".to_string(),
                "13:00:00".to_string(),
                "12.5".to_string(),
                String::new(),
            ],
        })
        .unwrap();

    let mut index = AggregationIndex::new();
    index.add_measurement("GARRISON-01", date(2017, 6, 29), None, Measurement::Temperature, 10.0);
    index.add_measurement("GARRISON-01", date(2017, 6, 30), None, Measurement::Temperature, 20.0);

    writer.begin_median_section().unwrap();
    assert_eq!(index.emit_summary(&mut writer).unwrap(), 1);
    assert_eq!(writer.rows_written(), 1);
    assert_eq!(writer.medians_written(), 1);

    let output = lines(writer.into_inner().unwrap());
    assert_eq!(
        output,
        vec![
            "Site,RawDataFile,Date,Time,Temp,DO_ppm",
            "GARRISON-01,garrison.csv,2017-06-29,13:00:00,12.5,",
            "",
            "MEDIAN VALUES",
            "GARRISON-01,\"Temp\",2017-06-29,15.0",
        ]
    );
}

#[test]
fn test_empty_run_still_has_marker() {
    let mut writer = SummaryWriter::new(Vec::new(), InstrumentMode::Logger, "mem").unwrap();
    writer.begin_median_section().unwrap();
    writer.begin_median_section().unwrap();

    let output = lines(writer.into_inner().unwrap());
    assert_eq!(output.len(), 3);
    assert!(output[0].starts_with("Site,RawDataFile,Date,Time,Temp,pH,mV_pH"));
    assert_eq!(output[2], "MEDIAN VALUES");
}

#[test]
fn test_rows_after_median_section_are_rejected() {
    let mut writer = SummaryWriter::new(Vec::new(), InstrumentMode::Temperature, "mem").unwrap();
    writer.begin_median_section().unwrap();
    let result = writer.write_row(&CanonicalRow {
        site: "COLD-01".to_string(),
        raw_data_file: "cold.csv".to_string(),
        fields: vec![String::new(); 4],
    });
    assert!(result.is_err());
}

#[test]
fn test_text_fields_are_quoted_when_needed() {
    let mut writer = SummaryWriter::new(Vec::new(), InstrumentMode::Logger, "mem").unwrap();
    let mut fields = vec![String::new(); 11];
    fields[9] = "cloudy, light rain".to_string();
    writer
        .write_row(&CanonicalRow {
            site: "MILL-01".to_string(),
            raw_data_file: "LOG1.xls".to_string(),
            fields,
        })
        .unwrap();

    let output = lines(writer.into_inner().unwrap());
    assert_eq!(output[1], "MILL-01,LOG1.xls,,,,,,,,,,\"cloudy, light rain\",");
}

#[test]
fn test_median_rows_quote_sites_with_commas() {
    let mut writer = SummaryWriter::new(Vec::new(), InstrumentMode::Logger, "mem").unwrap();
    let mut index = AggregationIndex::new();
    index.add_measurement("Mill Creek, upper", date(2017, 6, 29), None, Measurement::Ph, 7.0);

    assert_eq!(index.emit_summary(&mut writer).unwrap(), 1);

    let output = lines(writer.into_inner().unwrap());
    assert_eq!(output[1], "");
    assert_eq!(output[2], "MEDIAN VALUES");
    assert_eq!(output[3], "\"Mill Creek, upper\",\"pH\",2017-06-29,7.0");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(output[3].as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(record.len(), 4);
    assert_eq!(&record[0], "Mill Creek, upper");
}
