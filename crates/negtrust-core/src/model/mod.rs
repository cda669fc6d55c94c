//! Core data model: actors, signed edges, and possibly-undefined metrics.

pub mod edge;
pub mod metric;

pub use edge::{NodeId, RawEdge, Sign, SignedEdge, sign_edges};
pub use metric::{Metric, NotApplicableReason};
