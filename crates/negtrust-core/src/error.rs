//! Error taxonomy for the analysis core.
//!
//! Every fallible library operation returns [`AnalysisError`]. Structural
//! measures that are merely undefined for a given graph (diameter of a
//! disconnected graph and friends) are *not* errors; they are reported as
//! [`crate::model::metric::Metric::NotApplicable`].

use std::fmt;

use crate::model::edge::NodeId;

/// Result alias used across the analysis crates.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Failures raised by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Period count must be at least one.
    #[error("invalid period count {0}: at least one period is required")]
    InvalidPeriodCount(usize),

    /// The operation needs at least one edge or node.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// The graph is too small for the requested measure.
    #[error("graph with {nodes} node(s) is too small for {measure}")]
    DegenerateGraph {
        /// Measure that was requested.
        measure: &'static str,
        /// Node count of the offending graph.
        nodes: usize,
    },

    /// A requested node id is not part of the graph.
    #[error("node {0} is not present in the graph")]
    MissingNode(NodeId),

    /// Power iteration did not converge.
    #[error("{measure} did not converge within {iterations} iterations")]
    Convergence {
        /// Measure that failed.
        measure: &'static str,
        /// Iterations performed before giving up.
        iterations: usize,
    },

    /// A centrality record for some measure holds no values.
    #[error("cannot average an empty {0} record")]
    EmptyRecord(&'static str),

    /// Trust magnitude that has no sign (NaN).
    #[error("trust magnitude {0} has no sign")]
    InvalidMagnitude(f64),

    /// Epoch seconds outside the representable calendar range.
    #[error("timestamp {0} is outside the representable range")]
    InvalidTimestamp(i64),

    /// Timestamp outside the global period range.
    #[error("timestamp {timestamp} is outside the period range [{start}, {end}]")]
    TimestampOutOfRange {
        /// Offending timestamp.
        timestamp: i64,
        /// Global minimum.
        start: i64,
        /// Global maximum.
        end: i64,
    },

    /// Histogram requested with zero bins.
    #[error("histogram needs at least one bin")]
    InvalidBinCount,

    /// Time series entries must arrive in ascending period order.
    #[error("period {got} pushed after period {last:?}; expected ascending order below {capacity}")]
    PeriodOutOfOrder {
        /// Period that was pushed.
        got: usize,
        /// Last accepted period, if any.
        last: Option<usize>,
        /// Number of periods in the series.
        capacity: usize,
    },
}

impl AnalysisError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPeriodCount(_) => ErrorCode::InvalidPeriodCount,
            Self::EmptyInput(_) => ErrorCode::EmptyInput,
            Self::DegenerateGraph { .. } => ErrorCode::DegenerateGraph,
            Self::MissingNode(_) => ErrorCode::MissingNode,
            Self::Convergence { .. } => ErrorCode::Convergence,
            Self::EmptyRecord(_) => ErrorCode::EmptyRecord,
            Self::InvalidMagnitude(_) => ErrorCode::InvalidMagnitude,
            Self::InvalidTimestamp(_) => ErrorCode::InvalidTimestamp,
            Self::TimestampOutOfRange { .. } => ErrorCode::TimestampOutOfRange,
            Self::InvalidBinCount => ErrorCode::InvalidBinCount,
            Self::PeriodOutOfOrder { .. } => ErrorCode::PeriodOutOfOrder,
        }
    }
}

/// Machine-readable error codes for scripted consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidPeriodCount,
    EmptyInput,
    InvalidMagnitude,
    InvalidTimestamp,
    TimestampOutOfRange,
    InvalidBinCount,
    DegenerateGraph,
    MissingNode,
    Convergence,
    EmptyRecord,
    PeriodOutOfOrder,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidPeriodCount => "E1001",
            Self::EmptyInput => "E1002",
            Self::InvalidMagnitude => "E1003",
            Self::InvalidTimestamp => "E1004",
            Self::TimestampOutOfRange => "E1005",
            Self::InvalidBinCount => "E1006",
            Self::DegenerateGraph => "E2001",
            Self::MissingNode => "E2002",
            Self::Convergence => "E3001",
            Self::EmptyRecord => "E3002",
            Self::PeriodOutOfOrder => "E4001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidPeriodCount => "Invalid period count",
            Self::EmptyInput => "Empty input",
            Self::InvalidMagnitude => "Invalid trust magnitude",
            Self::InvalidTimestamp => "Invalid timestamp",
            Self::TimestampOutOfRange => "Timestamp outside period range",
            Self::InvalidBinCount => "Invalid histogram bin count",
            Self::DegenerateGraph => "Graph too small for measure",
            Self::MissingNode => "Node not found in graph",
            Self::Convergence => "Iterative centrality did not converge",
            Self::EmptyRecord => "Empty centrality record",
            Self::PeriodOutOfOrder => "Time series period out of order",
        }
    }

    /// Optional remediation hint surfaced by the CLI.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidPeriodCount => Some("Pass --periods with a value of 1 or more."),
            Self::EmptyInput => Some("Check that the edge file has rows after the header."),
            Self::InvalidMagnitude => Some("Remove rows whose TRUST_INDEX is not a number."),
            Self::InvalidTimestamp => Some("TIME_SINCE_EPOCH must be seconds since 1970-01-01."),
            Self::Convergence => Some(
                "Raise [centrality] max_iter, relax tolerance, or set on_convergence_failure = \"skip\".",
            ),
            Self::TimestampOutOfRange
            | Self::InvalidBinCount
            | Self::DegenerateGraph
            | Self::MissingNode
            | Self::EmptyRecord
            | Self::PeriodOutOfOrder => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisError, ErrorCode};
    use crate::model::edge::NodeId;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 11] = [
        ErrorCode::InvalidPeriodCount,
        ErrorCode::EmptyInput,
        ErrorCode::InvalidMagnitude,
        ErrorCode::InvalidTimestamp,
        ErrorCode::TimestampOutOfRange,
        ErrorCode::InvalidBinCount,
        ErrorCode::DegenerateGraph,
        ErrorCode::MissingNode,
        ErrorCode::Convergence,
        ErrorCode::EmptyRecord,
        ErrorCode::PeriodOutOfOrder,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn errors_map_to_codes() {
        assert_eq!(
            AnalysisError::InvalidPeriodCount(0).code(),
            ErrorCode::InvalidPeriodCount
        );
        assert_eq!(
            AnalysisError::MissingNode(NodeId(7)).code().code(),
            "E2002"
        );
        assert_eq!(
            AnalysisError::Convergence {
                measure: "eigenvector",
                iterations: 100
            }
            .code(),
            ErrorCode::Convergence
        );
    }

    #[test]
    fn display_mentions_offending_values() {
        let err = AnalysisError::DegenerateGraph {
            measure: "degree centrality",
            nodes: 1,
        };
        assert_eq!(
            err.to_string(),
            "graph with 1 node(s) is too small for degree centrality"
        );
        assert_eq!(
            AnalysisError::MissingNode(NodeId(42)).to_string(),
            "node 42 is not present in the graph"
        );
    }
}
