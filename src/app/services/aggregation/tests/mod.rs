//! Test utilities for the aggregation engine

use chrono::{NaiveDate, NaiveTime};

use super::{MedianRow, MedianSink};
use crate::Result;

mod index_tests;

/// Sink that keeps every row it receives
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub rows: Vec<MedianRow>,
}

impl MedianSink for CollectingSink {
    fn write_median(&mut self, row: &MedianRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}
