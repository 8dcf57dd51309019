use crate::range::RangeSelection;
use std::collections::VecDeque;
use std::time::Duration;

/// Default maximum number of samples kept per metric.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Bounded, oldest-evicting record of samples for one metric.
///
/// Samples are kept in arrival order at full precision; nothing ever
/// reorders them.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most `capacity` samples (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Append `value` as the newest sample, evicting from the front until the
    /// length is back at capacity.
    pub fn append(&mut self, value: f64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Suffix of the buffer covered by `range` when sampling every `period`.
    #[must_use]
    pub fn filter(&self, range: RangeSelection, period: Duration) -> Vec<f64> {
        let len  = self.samples.len();
        let take = range.points_for(period).map_or(len, |n| n.min(len));
        self.samples.range(len - take..).copied().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
