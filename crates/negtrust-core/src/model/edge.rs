//! Trust edges: raw dataset rows and their signed form.
//!
//! A [`RawEdge`] is one row of the ingested dataset with the original trust
//! magnitude. [`RawEdge::into_signed`] reduces the magnitude to a [`Sign`],
//! after which the magnitude is gone for good.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::time::normalize::to_datetime;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Actor identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// Sign
// ---------------------------------------------------------------------------

/// Trust sign of an edge. Serialized as `-1`, `0`, or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sign {
    Negative,
    Neutral,
    Positive,
}

impl Sign {
    /// Reduce a raw trust magnitude to its sign.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidMagnitude`] for NaN.
    pub fn from_magnitude(magnitude: f64) -> AnalysisResult<Self> {
        if magnitude.is_nan() {
            return Err(AnalysisError::InvalidMagnitude(magnitude));
        }
        Ok(if magnitude < 0.0 {
            Self::Negative
        } else if magnitude > 0.0 {
            Self::Positive
        } else {
            Self::Neutral
        })
    }

    /// Numeric weight of this sign.
    #[must_use]
    pub const fn weight(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
        }
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        sign.weight()
    }
}

impl TryFrom<i8> for Sign {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Negative),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Positive),
            other => Err(format!("sign must be -1, 0, or 1, got {other}")),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => f.write_str("-1"),
            Self::Neutral => f.write_str("0"),
            Self::Positive => f.write_str("+1"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawEdge
// ---------------------------------------------------------------------------

/// One ingested dataset row. Field names follow the dataset columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEdge {
    #[serde(rename = "FROM_NODE")]
    pub from_node: NodeId,
    #[serde(rename = "TO_NODE")]
    pub to_node: NodeId,
    /// Trust magnitude as recorded (e.g. -10..=10).
    #[serde(rename = "TRUST_INDEX")]
    pub trust: f64,
    /// Seconds since the Unix epoch.
    #[serde(rename = "TIME_SINCE_EPOCH")]
    pub time_since_epoch: i64,
}

impl RawEdge {
    /// Convert to a [`SignedEdge`], discarding the magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidMagnitude`] when the trust value is NaN.
    pub fn into_signed(self) -> AnalysisResult<SignedEdge> {
        Ok(SignedEdge {
            from: self.from_node,
            to: self.to_node,
            sign: Sign::from_magnitude(self.trust)?,
            timestamp: self.time_since_epoch,
        })
    }
}

/// Convert a batch of raw rows, failing on the first row without a sign.
///
/// # Errors
///
/// Propagates [`AnalysisError::InvalidMagnitude`].
pub fn sign_edges(raw: impl IntoIterator<Item = RawEdge>) -> AnalysisResult<Vec<SignedEdge>> {
    raw.into_iter().map(RawEdge::into_signed).collect()
}

// ---------------------------------------------------------------------------
// SignedEdge
// ---------------------------------------------------------------------------

/// A directed trust edge with its sign and formation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub sign: Sign,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

impl SignedEdge {
    #[must_use]
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, sign: Sign, timestamp: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            sign,
            timestamp,
        }
    }

    /// Formation time as an absolute UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidTimestamp`] if the seconds are out of range.
    pub fn formed_at(&self) -> AnalysisResult<DateTime<Utc>> {
        to_datetime(self.timestamp)
    }

    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.from.0 == self.to.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitudes_reduce_to_sign() {
        assert_eq!(Sign::from_magnitude(5.0), Ok(Sign::Positive));
        assert_eq!(Sign::from_magnitude(-3.0), Ok(Sign::Negative));
        assert_eq!(Sign::from_magnitude(2.0), Ok(Sign::Positive));
        assert_eq!(Sign::from_magnitude(-8.0), Ok(Sign::Negative));
        assert_eq!(Sign::from_magnitude(0.0), Ok(Sign::Neutral));
        assert_eq!(Sign::from_magnitude(-0.0), Ok(Sign::Neutral));
    }

    #[test]
    fn nan_magnitude_rejected() {
        assert!(matches!(
            Sign::from_magnitude(f64::NAN),
            Err(AnalysisError::InvalidMagnitude(_))
        ));
    }

    #[test]
    fn raw_edge_keeps_endpoints_and_time() {
        let raw = RawEdge {
            from_node: NodeId(6),
            to_node: NodeId(2),
            trust: -4.0,
            time_since_epoch: 1_289_241_911,
        };
        let edge = raw.into_signed().expect("signed");
        assert_eq!(edge, SignedEdge::new(6, 2, Sign::Negative, 1_289_241_911));
    }

    #[test]
    fn sign_serializes_as_integer() {
        let json = serde_json::to_string(&Sign::Negative).expect("serialize");
        assert_eq!(json, "-1");
        let back: Sign = serde_json::from_str("1").expect("deserialize");
        assert_eq!(back, Sign::Positive);
        assert!(serde_json::from_str::<Sign>("3").is_err());
    }

    #[test]
    fn raw_edge_reads_dataset_column_names() {
        let row = r#"{"FROM_NODE":1,"TO_NODE":2,"TRUST_INDEX":-10,"TIME_SINCE_EPOCH":1000}"#;
        let raw: RawEdge = serde_json::from_str(row).expect("parse");
        assert_eq!(raw.to_node, NodeId(2));
        assert!((raw.trust + 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn batch_conversion_stops_on_nan() {
        let rows = vec![
            RawEdge {
                from_node: NodeId(1),
                to_node: NodeId(2),
                trust: 1.0,
                time_since_epoch: 0,
            },
            RawEdge {
                from_node: NodeId(2),
                to_node: NodeId(3),
                trust: f64::NAN,
                time_since_epoch: 1,
            },
        ];
        assert!(sign_edges(rows).is_err());
    }
}
