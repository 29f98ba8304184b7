//! Date-bucketed median tracking for one (site, measurement) pair
//!
//! Readings from adjacent calendar days land in the same bucket. A new date
//! joins the bucket of an already-seen `date - 1` first, then `date + 1`, and
//! otherwise opens a bucket keyed by itself. Every date that has been seen is
//! remembered with its bucket, so runs of consecutive days chain together.

use super::median::MedianAccumulator;
use crate::Result;
use chrono::{NaiveDate, NaiveTime};
use std::collections::{BTreeMap, HashMap};

/// One median bucket with its first-observed time
#[derive(Debug, Clone, Default)]
pub struct DateBucket {
    pub accumulator: MedianAccumulator,
    /// Time of the reading that opened the bucket
    pub first_time: Option<NaiveTime>,
}

/// Median accumulators keyed by bucket date
#[derive(Debug, Clone, Default)]
pub struct DateBucketedMeasurement {
    buckets: BTreeMap<NaiveDate, DateBucket>,
    bucket_of: HashMap<NaiveDate, NaiveDate>,
}

impl DateBucketedMeasurement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket key a reading on `date` folds into
    fn resolve_bucket(&self, date: NaiveDate) -> NaiveDate {
        if let Some(key) = self.bucket_of.get(&date) {
            return *key;
        }
        let neighbour = |d: Option<NaiveDate>| d.and_then(|d| self.bucket_of.get(&d)).copied();
        neighbour(date.pred_opt())
            .or_else(|| neighbour(date.succ_opt()))
            .unwrap_or(date)
    }

    /// Record one reading
    pub fn record_value(&mut self, date: NaiveDate, time: Option<NaiveTime>, value: f64) {
        let key = self.resolve_bucket(date);
        self.bucket_of.entry(date).or_insert(key);

        let bucket = self.buckets.entry(key).or_insert_with(|| DateBucket {
            accumulator: MedianAccumulator::new(),
            first_time: time,
        });
        bucket.accumulator.add_num(value);
    }

    /// Median per bucket, ordered by bucket date
    pub fn calc_medians(&self) -> Result<BTreeMap<NaiveDate, f64>> {
        self.buckets
            .iter()
            .map(|(date, bucket)| Ok((*date, bucket.accumulator.find_median()?)))
            .collect()
    }

    /// First-observed time of the bucket keyed by `date`
    pub fn first_time(&self, date: NaiveDate) -> Option<NaiveTime> {
        self.buckets.get(&date).and_then(|b| b.first_time)
    }

    /// Bucket key that readings on `date` were folded into
    pub fn bucket_for(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.bucket_of.get(&date).copied()
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&NaiveDate, &DateBucket)> {
        self.buckets.iter()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
