//! Fixed-width degree histogram.

use negtrust_core::error::{AnalysisError, AnalysisResult};
use serde::Serialize;
use tracing::warn;

/// Nodes whose degree lies in `[start, end)`. The last bucket ends at the
/// configured maximum degree, is closed, and also absorbs every degree
/// above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DegreeBucket {
    pub start: usize,
    pub end: usize,
    pub count: usize,
}

/// Bucket `degrees` into `max_degree / width` buckets of `width`.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidBinCount`] when `width` is zero or
/// larger than `max_degree`.
pub fn degree_histogram(
    degrees: &[usize],
    width: usize,
    max_degree: usize,
) -> AnalysisResult<Vec<DegreeBucket>> {
    if width == 0 || width > max_degree {
        return Err(AnalysisError::InvalidBinCount);
    }
    let buckets = max_degree / width;

    let mut histogram: Vec<DegreeBucket> = (0..buckets)
        .map(|i| DegreeBucket {
            start: i * width,
            end: if i + 1 == buckets { max_degree } else { (i + 1) * width },
            count: 0,
        })
        .collect();

    let mut clamped = 0_usize;
    for &d in degrees {
        if d > max_degree {
            clamped += 1;
        }
        let idx = (d / width).min(buckets - 1);
        histogram[idx].count += 1;
    }
    if clamped > 0 {
        warn!(clamped, max_degree, "degrees above histogram range folded into last bucket");
    }
    Ok(histogram)
}
