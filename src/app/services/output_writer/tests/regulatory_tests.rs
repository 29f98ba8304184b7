use super::{date, lines, time};
use crate::app::models::{Measurement, RawReading};
use crate::app::services::aggregation::AggregationIndex;
use crate::app::services::output_writer::{
    ReadingSink, RegulatoryWriter, TemperatureExports, render_regulatory_row,
};
use crate::config::RegulatoryConfig;
use crate::constants::regulatory;
use tempfile::TempDir;

#[test]
fn test_rendered_row_populates_template_fields() {
    let config = RegulatoryConfig::default();
    let row = render_regulatory_row(
        &config,
        "TITUS-01",
        date(2017, 7, 4),
        Some(time(9, 5, 0)),
        Measurement::DissolvedOxygenPercent,
        98.0,
        regulatory::MEDIAN_COMMENT,
    )
    .unwrap();

    assert_eq!(row.len(), 58);
    assert_eq!(row[regulatory::STUDY_ID], "KC_STREAMS");
    assert_eq!(row[regulatory::LOCATION_ID], "TITUS-01");
    assert_eq!(row[regulatory::FIELD_COLLECTION_TYPE], "Measurement");
    assert_eq!(row[regulatory::FIELD_COLLECTOR], "Kooskooskie Commons");
    assert_eq!(row[regulatory::START_DATE], "07/04/2017");
    assert_eq!(row[regulatory::START_TIME], "09:05:00");
    assert_eq!(row[regulatory::FIELD_COLLECTION_COMMENT], "Daily median");
    assert_eq!(row[regulatory::PARAMETER_NAME], "Dissolved Oxygen Saturation");
    assert_eq!(row[regulatory::RESULT_VALUE], "98.0");
    assert_eq!(row[regulatory::RESULT_UNITS], "%");
    assert_eq!(row[regulatory::RESULT_METHOD], "SM4500-OG");
    assert_eq!(row[regulatory::SAMPLE_MATRIX], "Water");
    assert_eq!(row[regulatory::SAMPLE_SOURCE], "Fresh/Surface Water");

    let populated = row.iter().filter(|v| !v.is_empty()).count();
    assert_eq!(populated, 13);
}

#[test]
fn test_unreported_measurements_render_nothing() {
    let config = RegulatoryConfig::default();
    for measurement in [Measurement::Other, Measurement::MilliVoltsPh] {
        assert!(
            render_regulatory_row(&config, "COLD-01", date(2017, 1, 1), None, measurement, 1.0, "")
                .is_none()
        );
    }
}

#[test]
fn test_median_export_skips_other() {
    let mut index = AggregationIndex::new();
    index.add_measurement("COLD-01", date(2017, 6, 1), None, Measurement::Other, 5.0);
    index.add_measurement("COLD-01", date(2017, 6, 1), None, Measurement::Ph, 7.5);

    let mut writer = RegulatoryWriter::new(Vec::new(), RegulatoryConfig::default(), "mem").unwrap();
    assert_eq!(index.emit_regulatory_export(&mut writer).unwrap(), 1);
    assert_eq!(writer.rows_written(), 1);

    let output = lines(writer.into_inner().unwrap());
    assert_eq!(output.len(), 2);
    assert!(output[0].starts_with("Study_ID,Location_ID,Study_Specific_Location_ID"));
    assert!(output[0].ends_with("Result_Taxon_Comment"));
    assert!(output[1].contains("SM4500-H+B"));
    assert!(!output.iter().any(|line| line.contains("Other")));
}

#[test]
fn test_temperature_exports_one_file_per_site() {
    let temp_dir = TempDir::new().unwrap();
    let mut exports = TemperatureExports::new(temp_dir.path(), RegulatoryConfig::default());

    let reading = |site: &str, measurement, value| RawReading {
        site: site.to_string(),
        date: date(2018, 8, 1),
        time: Some(time(14, 0, 0)),
        measurement,
        value,
        source_file: "x.csv".to_string(),
    };

    exports.write_reading(&reading("GARRISON-01", Measurement::Temperature, Some(18.25))).unwrap();
    exports.write_reading(&reading("GARRISON-01", Measurement::DissolvedOxygen, Some(8.0))).unwrap();
    exports.write_reading(&reading("GARRISON-01", Measurement::Temperature, None)).unwrap();
    exports.write_reading(&reading("MILL-01", Measurement::Temperature, Some(16.0))).unwrap();
    assert_eq!(exports.rows_written(), 3);

    let garrison_path = exports.path_for("GARRISON-01");
    assert_eq!(exports.finish().unwrap(), 2);

    let contents = std::fs::read_to_string(garrison_path).unwrap();
    let rows: Vec<&str> = contents.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].contains("\"Temperature, water\",,18.25,deg C"));
    assert!(rows[1].contains("08/01/2018,14:00:00"));
    assert!(temp_dir.path().join("MILL-01_Temperature_DoE.csv").exists());
}
