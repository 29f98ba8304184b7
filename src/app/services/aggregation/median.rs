//! Streaming median accumulator
//!
//! Keeps the lower half of the values in a max-heap and the upper half in a
//! min-heap. After every insert the heap sizes differ by at most one and every
//! value in the lower half is less than or equal to every value in the upper
//! half, so the median is always read from the heap tops.

use crate::{Error, Result};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Two-heap median accumulator with O(log n) inserts
#[derive(Debug, Clone, Default)]
pub struct MedianAccumulator {
    low: BinaryHeap<OrderedFloat<f64>>,
    high: BinaryHeap<Reverse<OrderedFloat<f64>>>,
}

impl MedianAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value and rebalance the partitions
    pub fn add_num(&mut self, value: f64) {
        let ord = OrderedFloat(value);
        match self.low.peek() {
            Some(top) if ord > *top => self.high.push(Reverse(ord)),
            _ => self.low.push(ord),
        }
        self.rebalance();
    }

    fn rebalance(&mut self) {
        if self.low.len() > self.high.len() + 1 {
            if let Some(value) = self.low.pop() {
                self.high.push(Reverse(value));
            }
        } else if self.high.len() > self.low.len() + 1 {
            if let Some(Reverse(value)) = self.high.pop() {
                self.low.push(value);
            }
        }
    }

    /// Current median
    ///
    /// Even counts return the mean of the two boundary values; odd counts
    /// return the top of the larger partition.
    pub fn find_median(&self) -> Result<f64> {
        let low = self.low.peek().map(|v| v.0);
        let high = self.high.peek().map(|Reverse(v)| v.0);

        match self.low.len().cmp(&self.high.len()) {
            std::cmp::Ordering::Greater => low.ok_or(Error::EmptyAccumulator),
            std::cmp::Ordering::Less => high.ok_or(Error::EmptyAccumulator),
            std::cmp::Ordering::Equal => match (low, high) {
                (Some(low), Some(high)) => Ok((low + high) / 2.0),
                _ => Err(Error::EmptyAccumulator),
            },
        }
    }

    /// Number of values added
    pub fn len(&self) -> usize {
        self.low.len() + self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sizes of the lower and upper partitions
    pub fn partition_sizes(&self) -> (usize, usize) {
        (self.low.len(), self.high.len())
    }
}
