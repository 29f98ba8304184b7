//! Streaming median aggregation
//!
//! - [`median`] - Two-heap streaming median accumulator
//! - [`tracker`] - Per-measurement date buckets with adjacent-day merging
//! - [`index`] - Site / measurement index and median emission

pub mod index;
pub mod median;
pub mod tracker;

#[cfg(test)]
pub mod tests;

pub use index::{AggregationIndex, MedianRow, MedianSink};
pub use median::MedianAccumulator;
pub use tracker::{DateBucket, DateBucketedMeasurement};
