//! Values that may be structurally undefined.
//!
//! Several graph measures only make sense under a precondition: diameter
//! needs a connected graph, modularity needs an undirected one, a sample
//! standard deviation needs two samples. [`Metric`] carries either the
//! value or the reason it does not apply, so consumers have to look.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a measure has no value for a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotApplicableReason {
    /// The graph has no nodes.
    EmptyGraph,
    /// Fewer than two nodes.
    TooFewNodes,
    /// Some pair of nodes has no connecting path.
    Disconnected,
    /// The measure is only defined for undirected graphs.
    Directed,
    /// The graph has no edges.
    NoEdges,
    /// Not enough samples for the statistic.
    InsufficientSamples,
}

impl fmt::Display for NotApplicableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EmptyGraph => "empty graph",
            Self::TooFewNodes => "fewer than two nodes",
            Self::Disconnected => "graph is disconnected",
            Self::Directed => "directed graph",
            Self::NoEdges => "no edges",
            Self::InsufficientSamples => "insufficient samples",
        };
        f.write_str(s)
    }
}

/// A measured value, or the reason it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric<T> {
    Value(T),
    NotApplicable(NotApplicableReason),
}

impl<T> Metric<T> {
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    #[must_use]
    pub const fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable(_))
    }

    /// The value, if defined.
    #[must_use]
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotApplicable(_) => None,
        }
    }

    #[must_use]
    pub const fn as_ref(&self) -> Metric<&T> {
        match self {
            Self::Value(v) => Metric::Value(v),
            Self::NotApplicable(r) => Metric::NotApplicable(*r),
        }
    }

    /// The reason the value is missing, if it is.
    #[must_use]
    pub const fn reason(&self) -> Option<NotApplicableReason> {
        match self {
            Self::Value(_) => None,
            Self::NotApplicable(r) => Some(*r),
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Self::Value(v) => Metric::Value(f(v)),
            Self::NotApplicable(r) => Metric::NotApplicable(r),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Metric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => v.fmt(f),
            Self::NotApplicable(reason) => write!(f, "n/a ({reason})"),
        }
    }
}
