//! Descriptive statistics of the edge formation times.
//!
//! Reports the spread of activity over the dataset lifetime: range,
//! central tendency, dispersion, and a fixed-bin frequency histogram of
//! timestamps. The histogram is plain data; drawing it is the caller's job.

use serde::Serialize;
use tracing::instrument;

use crate::error::{AnalysisError, AnalysisResult};
use crate::model::metric::{Metric, NotApplicableReason};

/// Default number of histogram bins.
pub const DEFAULT_TIME_BINS: usize = 100;

/// One histogram bucket over epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeBucket {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge; exclusive except for the last bucket.
    pub end: f64,
    pub count: usize,
}

/// Summary statistics of a timestamp column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std: Metric<f64>,
    pub histogram: Vec<TimeBucket>,
}

impl TimeStats {
    /// Compute statistics over `timestamps` with a `bins`-bucket histogram.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptyInput`] if `timestamps` is empty.
    /// - [`AnalysisError::InvalidBinCount`] if `bins == 0`.
    #[instrument(skip(timestamps), fields(n = timestamps.len()))]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(timestamps: &[i64], bins: usize) -> AnalysisResult<Self> {
        if bins == 0 {
            return Err(AnalysisError::InvalidBinCount);
        }
        if timestamps.is_empty() {
            return Err(AnalysisError::EmptyInput("time statistics need at least one timestamp"));
        }

        let mut sorted = timestamps.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let min = sorted[0];
        let max = sorted[count - 1];

        let n = count as f64;
        let mean = sorted.iter().map(|&t| t as f64).sum::<f64>() / n;

        let median = if count % 2 == 1 {
            sorted[count / 2] as f64
        } else {
            (sorted[count / 2 - 1] as f64 + sorted[count / 2] as f64) / 2.0
        };

        let std = if count < 2 {
            Metric::NotApplicable(NotApplicableReason::InsufficientSamples)
        } else {
            let ss: f64 = sorted
                .iter()
                .map(|&t| {
                    let d = t as f64 - mean;
                    d * d
                })
                .sum();
            Metric::Value((ss / (n - 1.0)).sqrt())
        };

        let histogram = histogram(&sorted, min, max, bins);

        Ok(Self {
            count,
            min,
            max,
            mean,
            median,
            std,
            histogram,
        })
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn histogram(values: &[i64], min: i64, max: i64, bins: usize) -> Vec<TimeBucket> {
    let lo = min as f64;
    let span = max as f64 - lo;
    let width = span / bins as f64;

    let mut buckets: Vec<TimeBucket> = (0..bins)
        .map(|i| TimeBucket {
            start: (i as f64).mul_add(width, lo),
            end: ((i + 1) as f64).mul_add(width, lo),
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = if span == 0.0 {
            0
        } else {
            (((v as f64 - lo) / width).floor() as usize).min(bins - 1)
        };
        buckets[idx].count += 1;
    }

    buckets
}
