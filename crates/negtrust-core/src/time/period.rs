//! Equal-width temporal segmentation.
//!
//! # Overview
//!
//! [`PeriodSegmenter`] splits the closed range `[min, max]` of all edge
//! timestamps into `N` contiguous bins of equal width. Bins are half-open
//! (`[start, end)`) except the last, which also includes `max`.
//!
//! Boundaries are computed once from the full dataset and then reused for
//! every subset, so period `k` means the same span of time everywhere.
//!
//! # Arithmetic
//!
//! Assignment is exact integer arithmetic on epoch seconds:
//!
//! ```text
//! period(t) = min(N - 1, floor((t - min) * N / (max - min)))
//! ```
//!
//! computed in `i128` so that `(t - min) * N` cannot overflow. When every
//! timestamp is identical (`max == min`) all edges land in period 0.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{AnalysisError, AnalysisResult};
use crate::model::edge::SignedEdge;

/// Index of a period in `[0, N)`.
pub type PeriodIndex = usize;

/// Integer bounds of one period, in epoch seconds.
///
/// Every integer timestamp `t` with `start <= t < end` (or `t <= end` when
/// `end_inclusive`) belongs to this period. A period whose `start == end`
/// and which is not inclusive is empty (possible when the span is shorter
/// than the number of periods).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodBounds {
    pub index: PeriodIndex,
    pub start: i64,
    pub end: i64,
    pub end_inclusive: bool,
}

impl PeriodBounds {
    #[must_use]
    pub const fn contains(&self, t: i64) -> bool {
        if self.end_inclusive {
            t >= self.start && t <= self.end
        } else {
            t >= self.start && t < self.end
        }
    }
}

/// Global period boundaries for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodSegmenter {
    start: i64,
    end: i64,
    count: usize,
}

impl PeriodSegmenter {
    /// Compute boundaries from the timestamps of `edges`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InvalidPeriodCount`] if `count == 0`.
    /// - [`AnalysisError::EmptyInput`] if `edges` is empty.
    pub fn from_edges(edges: &[SignedEdge], count: usize) -> AnalysisResult<Self> {
        Self::from_timestamps(edges.iter().map(|e| e.timestamp), count)
    }

    /// Compute boundaries from raw timestamps.
    ///
    /// # Errors
    ///
    /// Same as [`PeriodSegmenter::from_edges`].
    #[instrument(skip(timestamps))]
    pub fn from_timestamps(
        timestamps: impl IntoIterator<Item = i64>,
        count: usize,
    ) -> AnalysisResult<Self> {
        if count == 0 {
            return Err(AnalysisError::InvalidPeriodCount(count));
        }

        let (start, end) = timestamps
            .into_iter()
            .fold(None, |acc: Option<(i64, i64)>, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
            .ok_or(AnalysisError::EmptyInput("period segmentation needs at least one edge"))?;

        debug!(start, end, count, "computed period boundaries");
        Ok(Self { start, end, count })
    }

    /// Number of periods.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Earliest timestamp in the dataset.
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Latest timestamp in the dataset.
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Nominal width of one period in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn width_seconds(&self) -> f64 {
        self.span() as f64 / self.count as f64
    }

    fn span(&self) -> i128 {
        i128::from(self.end) - i128::from(self.start)
    }

    /// Period index of a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::TimestampOutOfRange`] when `t` lies outside
    /// `[start, end]`.
    pub fn period_of(&self, t: i64) -> AnalysisResult<PeriodIndex> {
        if t < self.start || t > self.end {
            return Err(AnalysisError::TimestampOutOfRange {
                timestamp: t,
                start: self.start,
                end: self.end,
            });
        }

        let span = self.span();
        if span == 0 {
            return Ok(0);
        }

        let offset = i128::from(t) - i128::from(self.start);
        let raw = offset * self.count_i128() / span;
        let idx = usize::try_from(raw).unwrap_or(usize::MAX);
        Ok(idx.min(self.count - 1))
    }

    /// Integer bounds of period `index`, or `None` if out of range.
    #[must_use]
    pub fn bounds(&self, index: PeriodIndex) -> Option<PeriodBounds> {
        if index >= self.count {
            return None;
        }
        let last = index + 1 == self.count;
        let span = self.span();

        if span == 0 {
            return Some(PeriodBounds {
                index,
                start: self.start,
                end: self.start,
                end_inclusive: index == 0,
            });
        }

        let origin = i128::from(self.start);
        let start = clamp_i64(origin + ceil_div(index_i128(index) * span, self.count_i128()));
        let end = if last {
            self.end
        } else {
            clamp_i64(origin + ceil_div(index_i128(index + 1) * span, self.count_i128()))
        };

        Some(PeriodBounds {
            index,
            start,
            end,
            end_inclusive: last,
        })
    }

    /// Bounds of every period in order.
    #[must_use]
    pub fn all_bounds(&self) -> Vec<PeriodBounds> {
        (0..self.count).filter_map(|i| self.bounds(i)).collect()
    }

    /// Period index for every edge, aligned with the input slice.
    ///
    /// # Errors
    ///
    /// Propagates [`AnalysisError::TimestampOutOfRange`] for edges that were
    /// not part of the dataset the boundaries were computed from.
    pub fn assign(&self, edges: &[SignedEdge]) -> AnalysisResult<Vec<PeriodIndex>> {
        edges.iter().map(|e| self.period_of(e.timestamp)).collect()
    }

    /// Split `edges` into one vector per period, preserving input order.
    ///
    /// # Errors
    ///
    /// Same as [`PeriodSegmenter::assign`].
    #[instrument(skip(self, edges), fields(edges = edges.len(), periods = self.count))]
    pub fn partition(&self, edges: &[SignedEdge]) -> AnalysisResult<Vec<Vec<SignedEdge>>> {
        let mut buckets: Vec<Vec<SignedEdge>> = vec![Vec::new(); self.count];
        for edge in edges {
            let idx = self.period_of(edge.timestamp)?;
            buckets[idx].push(*edge);
        }
        Ok(buckets)
    }

    fn count_i128(&self) -> i128 {
        index_i128(self.count)
    }
}

/// Assign every edge to one of `count` global periods.
///
/// Convenience wrapper over [`PeriodSegmenter`] for one-shot use.
///
/// # Errors
///
/// - [`AnalysisError::InvalidPeriodCount`] if `count == 0`.
/// - [`AnalysisError::EmptyInput`] if `edges` is empty.
pub fn segment(edges: &[SignedEdge], count: usize) -> AnalysisResult<Vec<PeriodIndex>> {
    PeriodSegmenter::from_edges(edges, count)?.assign(edges)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn index_i128(i: usize) -> i128 {
    i128::try_from(i).unwrap_or(i128::MAX)
}

/// Boundaries never exceed the dataset maximum, so this only guards the type.
fn clamp_i64(v: i128) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Ceiling division for non-negative numerators and positive denominators.
const fn ceil_div(num: i128, den: i128) -> i128 {
    (num + den - 1) / den
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
