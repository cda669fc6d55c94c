//! Epoch seconds to absolute UTC instants.

use chrono::{DateTime, Utc};

use crate::error::{AnalysisError, AnalysisResult};

/// Convert seconds since the Unix epoch to a UTC instant.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidTimestamp`] if `secs` is outside the
/// range chrono can represent.
pub fn to_datetime(secs: i64) -> AnalysisResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(AnalysisError::InvalidTimestamp(secs))
}

/// Convert a batch of epoch seconds, failing on the first bad value.
///
/// # Errors
///
/// Propagates [`AnalysisError::InvalidTimestamp`].
pub fn to_datetimes(secs: &[i64]) -> AnalysisResult<Vec<DateTime<Utc>>> {
    secs.iter().copied().map(to_datetime).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_1970() {
        let dt = to_datetime(0).expect("valid");
        assert_eq!(dt.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn dataset_timestamp_converts() {
        // First edge of the bitcoin-otc export.
        let dt = to_datetime(1_289_241_911).expect("valid");
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2010-11-08");
    }

    #[test]
    fn negative_seconds_are_before_epoch() {
        let dt = to_datetime(-86_400).expect("valid");
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "1969-12-31");
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(
            to_datetime(i64::MAX),
            Err(AnalysisError::InvalidTimestamp(i64::MAX))
        );
        assert!(to_datetimes(&[0, i64::MIN]).is_err());
    }
}
