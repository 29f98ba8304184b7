//! Tests for the aggregation index

use super::{CollectingSink, date, time};
use crate::app::models::{Measurement, RawReading};
use crate::app::services::aggregation::AggregationIndex;

#[test]
fn test_trackers_are_created_lazily() {
    let mut index = AggregationIndex::new();
    assert!(index.is_empty());
    assert!(index.tracker("GARRISON-01", Measurement::Temperature).is_none());

    index.add_measurement("GARRISON-01", date(2017, 6, 29), None, Measurement::Temperature, 12.5);

    assert!(index.tracker("GARRISON-01", Measurement::Temperature).is_some());
    assert!(index.tracker("GARRISON-01", Measurement::Ph).is_none());
    assert_eq!(index.reading_count(), 1);
}

#[test]
fn test_two_files_for_one_site_merge_adjacent_days() {
    let mut index = AggregationIndex::new();
    // First workbook
    index.add_measurement("MILL-01", date(2017, 6, 29), None, Measurement::Ph, 10.0);
    // Second workbook, next day
    index.add_measurement("MILL-01", date(2017, 6, 30), None, Measurement::Ph, 20.0);

    let rows = index.median_rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].site, "MILL-01");
    assert_eq!(rows[0].date, date(2017, 6, 29));
    assert_eq!(rows[0].median, 15.0);
}

#[test]
fn test_median_rows_are_ordered() {
    let mut index = AggregationIndex::new();
    index.add_measurement("TITUS-01", date(2017, 7, 10), None, Measurement::Ph, 7.0);
    index.add_measurement("COLD-01", date(2017, 7, 10), None, Measurement::Turbidity, 3.0);
    index.add_measurement("COLD-01", date(2017, 7, 1), None, Measurement::Temperature, 14.0);
    index.add_measurement("COLD-01", date(2017, 7, 10), None, Measurement::Temperature, 16.0);

    let keys: Vec<(String, Measurement, chrono::NaiveDate)> = index
        .median_rows()
        .unwrap()
        .into_iter()
        .map(|r| (r.site, r.measurement, r.date))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("COLD-01".to_string(), Measurement::Temperature, date(2017, 7, 1)),
            ("COLD-01".to_string(), Measurement::Temperature, date(2017, 7, 10)),
            ("COLD-01".to_string(), Measurement::Turbidity, date(2017, 7, 10)),
            ("TITUS-01".to_string(), Measurement::Ph, date(2017, 7, 10)),
        ]
    );
}

#[test]
fn test_regulatory_export_excludes_unreported_measurements() {
    let mut index = AggregationIndex::new();
    index.add_measurement("RUSSELL-01", date(2017, 8, 2), None, Measurement::Other, 42.0);
    index.add_measurement("RUSSELL-01", date(2017, 8, 2), None, Measurement::MilliVoltsPh, -12.0);
    index.add_measurement("RUSSELL-01", date(2017, 8, 2), None, Measurement::Conductivity, 310.0);

    let mut summary = CollectingSink::default();
    assert_eq!(index.emit_summary(&mut summary).unwrap(), 3);
    assert!(summary.rows.iter().any(|r| r.measurement == Measurement::Other));

    let mut regulatory = CollectingSink::default();
    assert_eq!(index.emit_regulatory_export(&mut regulatory).unwrap(), 1);
    assert_eq!(regulatory.rows[0].measurement, Measurement::Conductivity);
}

#[test]
fn test_first_time_flows_into_rows() {
    let mut index = AggregationIndex::new();
    index.add_measurement(
        "YELLOWHAWK-02",
        date(2019, 5, 1),
        Some(time(11, 20, 0)),
        Measurement::DissolvedOxygen,
        9.1,
    );

    let rows = index.median_rows().unwrap();
    assert_eq!(rows[0].time, Some(time(11, 20, 0)));
}

#[test]
fn test_missing_and_non_finite_values_are_ignored() {
    let mut index = AggregationIndex::new();
    let reading = RawReading {
        site: "COLD-01".to_string(),
        date: date(2017, 6, 1),
        time: None,
        measurement: Measurement::Temperature,
        value: None,
        source_file: "cold.csv".to_string(),
    };
    assert!(!index.record(&reading));
    assert!(!index.add_measurement("COLD-01", date(2017, 6, 1), None, Measurement::Temperature, f64::NAN));

    let reading = RawReading {
        value: Some(11.0),
        ..reading
    };
    assert!(index.record(&reading));
    assert_eq!(index.reading_count(), 1);
    assert_eq!(index.sites().collect::<Vec<_>>(), vec!["COLD-01"]);
}
