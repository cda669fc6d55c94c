//! Temporal handling: epoch conversion, period segmentation, statistics.
//!
//! ```text
//! RawEdge.TIME_SINCE_EPOCH
//!        ↓  normalize::to_datetime()      (absolute instant, for display)
//!        ↓  period::PeriodSegmenter       (global equal-width buckets)
//! Vec<Vec<SignedEdge>>                    (one edge list per period)
//! ```

pub mod normalize;
pub mod period;
pub mod stats;

pub use normalize::{to_datetime, to_datetimes};
pub use period::{PeriodBounds, PeriodIndex, PeriodSegmenter, segment};
pub use stats::{DEFAULT_TIME_BINS, TimeBucket, TimeStats};
