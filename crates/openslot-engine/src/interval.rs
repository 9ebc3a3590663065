//! Busy-interval algebra: interval construction and merge normalization.
//!
//! Sorts intervals by start time, then folds overlapping or touching
//! intervals into a minimal sorted sequence of disjoint spans.

use chrono::{DateTime, Duration, Utc};

/// A span of time between two UTC instants.
///
/// The constructor enforces `start < end`; zero-width and inverted spans are
/// rejected so the downstream algebra never sees a degenerate interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create an interval, rejecting `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes between start and end.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// True when the two intervals share more than a single boundary instant.
    pub fn intersects(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Merge possibly overlapping, unsorted intervals into a minimal sorted,
/// pairwise-disjoint sequence covering the same union of instants.
///
/// Intervals that merely touch (one ends exactly where the next starts) are
/// merged as well: adjacent buffered events must not leave a zero-width
/// "free" sliver between them.
pub fn merge(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    intervals.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }
    merged
}
