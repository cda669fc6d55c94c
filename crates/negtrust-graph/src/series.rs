//! Ordered per-period centrality series.
//!
//! The [`TimeSeriesAssembler`] accepts one entry per period in strictly
//! ascending period order and produces an immutable [`TimeSeries`] with
//! exactly one entry per period. Nothing is interpolated: a period without
//! a value is an explicit [`PeriodEntry::Hole`].

use std::fmt;

use negtrust_core::error::{AnalysisError, AnalysisResult};
use negtrust_core::time::PeriodIndex;
use serde::Serialize;

use crate::metrics::{AggregatedCentrality, Measure};

/// Why a period has no aggregated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleReason {
    /// No edges fell into the period.
    EmptyPeriod,
    /// No node of the period received a negative rating.
    NoNegativeNodes,
    /// The period graph was too small for degree centrality.
    DegenerateGraph,
    /// Eigenvector centrality did not converge and the run was told to skip.
    ConvergenceFailed,
    /// The period was never handed to the assembler.
    NotComputed,
}

impl HoleReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyPeriod => "empty period",
            Self::NoNegativeNodes => "no negative nodes",
            Self::DegenerateGraph => "degenerate graph",
            Self::ConvergenceFailed => "convergence failed",
            Self::NotComputed => "not computed",
        }
    }
}

impl fmt::Display for HoleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One period of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeriodEntry {
    Recorded(AggregatedCentrality),
    Hole { reason: HoleReason },
}

impl PeriodEntry {
    #[must_use]
    pub const fn hole(reason: HoleReason) -> Self {
        Self::Hole { reason }
    }

    #[must_use]
    pub const fn is_hole(&self) -> bool {
        matches!(self, Self::Hole { .. })
    }

    #[must_use]
    pub const fn hole_reason(&self) -> Option<HoleReason> {
        match self {
            Self::Hole { reason } => Some(*reason),
            Self::Recorded(_) => None,
        }
    }

    /// Value of `measure`, or `None` for a hole.
    #[must_use]
    pub const fn value(&self, measure: Measure) -> Option<f64> {
        match self {
            Self::Recorded(agg) => Some(agg.get(measure)),
            Self::Hole { .. } => None,
        }
    }
}

/// Single-owner builder for a [`TimeSeries`].
#[derive(Debug, Clone)]
pub struct TimeSeriesAssembler {
    capacity: usize,
    last: Option<PeriodIndex>,
    entries: Vec<PeriodEntry>,
}

impl TimeSeriesAssembler {
    /// Assembler for a run with `capacity` periods.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            last: None,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append the entry for `period`.
    ///
    /// Periods skipped since the last push are recorded as
    /// [`HoleReason::NotComputed`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::PeriodOutOfOrder`] when `period` is not
    /// greater than the last pushed period or is outside the series.
    pub fn push(&mut self, period: PeriodIndex, entry: PeriodEntry) -> AnalysisResult<()> {
        let ascending = self.last.is_none_or(|last| period > last);
        if !ascending || period >= self.capacity {
            return Err(AnalysisError::PeriodOutOfOrder {
                got: period,
                last: self.last,
                capacity: self.capacity,
            });
        }

        self.entries
            .resize(period, PeriodEntry::hole(HoleReason::NotComputed));
        self.entries.push(entry);
        self.last = Some(period);
        Ok(())
    }

    /// Close the series, marking every remaining period as not computed.
    #[must_use]
    pub fn finish(mut self) -> TimeSeries {
        self.entries
            .resize(self.capacity, PeriodEntry::hole(HoleReason::NotComputed));
        TimeSeries {
            entries: self.entries,
        }
    }
}

/// Immutable per-period series; entry `i` belongs to period `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    entries: Vec<PeriodEntry>,
}

impl TimeSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[PeriodEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, period: PeriodIndex) -> Option<&PeriodEntry> {
        self.entries.get(period)
    }

    /// `(period, value)` pairs for one measure, holes as `None`.
    #[must_use]
    pub fn measure_series(&self, measure: Measure) -> Vec<(PeriodIndex, Option<f64>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(period, entry)| (period, entry.value(measure)))
            .collect()
    }

    /// Number of periods carrying a value.
    #[must_use]
    pub fn recorded_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_hole()).count()
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.entries.len() - self.recorded_count()
    }
}
