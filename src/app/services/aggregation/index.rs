//! Site / measurement aggregation root
//!
//! The index is constructed once per run and passed by reference into every
//! file-processing call, so later files fold into the same buckets as earlier
//! ones.

use super::tracker::DateBucketedMeasurement;
use crate::app::models::{Measurement, RawReading};
use crate::Result;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use tracing::debug;

/// One daily median ready for output
#[derive(Debug, Clone, PartialEq)]
pub struct MedianRow {
    pub site: String,
    pub measurement: Measurement,
    /// Bucket key date
    pub date: NaiveDate,
    /// First-observed time in the bucket
    pub time: Option<NaiveTime>,
    pub median: f64,
}

/// Destination for median rows
pub trait MedianSink {
    fn write_median(&mut self, row: &MedianRow) -> Result<()>;
}

/// site → measurement → date-bucketed tracker
#[derive(Debug, Default)]
pub struct AggregationIndex {
    sites: BTreeMap<String, BTreeMap<Measurement, DateBucketedMeasurement>>,
    readings: usize,
}

impl AggregationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one reading, creating trackers on first use
    ///
    /// Non-finite values are ignored. Returns whether the value was recorded.
    pub fn add_measurement(
        &mut self,
        site: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
        measurement: Measurement,
        value: f64,
    ) -> bool {
        if !value.is_finite() {
            debug!("Ignoring non-finite {} value for {} on {}", measurement, site, date);
            return false;
        }

        self.sites
            .entry(site.to_string())
            .or_default()
            .entry(measurement)
            .or_default()
            .record_value(date, time, value);
        self.readings += 1;
        true
    }

    /// Record a reading produced by a reader; missing values are skipped
    pub fn record(&mut self, reading: &RawReading) -> bool {
        match reading.value {
            Some(value) => self.add_measurement(
                &reading.site,
                reading.date,
                reading.time,
                reading.measurement,
                value,
            ),
            None => false,
        }
    }

    /// All medians ordered by site, measurement and bucket date
    pub fn median_rows(&self) -> Result<Vec<MedianRow>> {
        let mut rows = Vec::new();
        for (site, measurements) in &self.sites {
            for (measurement, tracker) in measurements {
                for (date, median) in tracker.calc_medians()? {
                    rows.push(MedianRow {
                        site: site.clone(),
                        measurement: *measurement,
                        date,
                        time: tracker.first_time(date),
                        median,
                    });
                }
            }
        }
        Ok(rows)
    }

    /// Write every (site, measurement, bucket) median to the sink
    pub fn emit_summary<S: MedianSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let rows = self.median_rows()?;
        for row in &rows {
            sink.write_median(row)?;
        }
        Ok(rows.len())
    }

    /// Write medians whose measurement is reported to the regulator
    pub fn emit_regulatory_export<S: MedianSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let mut written = 0;
        for row in self.median_rows()? {
            if row.measurement.regulatory_parameter().is_some() {
                sink.write_median(&row)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Tracker for a site and measurement, if any reading was recorded
    pub fn tracker(&self, site: &str, measurement: Measurement) -> Option<&DateBucketedMeasurement> {
        self.sites.get(site).and_then(|m| m.get(&measurement))
    }

    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Number of readings recorded so far
    pub fn reading_count(&self) -> usize {
        self.readings
    }

    pub fn is_empty(&self) -> bool {
        self.readings == 0
    }
}
