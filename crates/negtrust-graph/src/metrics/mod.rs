//! Centrality metrics for the trust graph.
//!
//! # Overview
//!
//! Three measures are computed over the **whole** period graph and then
//! restricted to the negative nodes:
//!
//! - **Degree** (`degree`): how many ratings touch the node?
//! - **Betweenness** (`betweenness`): how often does the node relay
//!   shortest paths between other actors?
//! - **Eigenvector** (`eigenvector`): is the node rated by actors who are
//!   themselves heavily rated?
//!
//! Restricting after the fact, rather than computing on the negative
//! subgraph, keeps every score relative to the full network of the period.
//!
//! ```rust,ignore
//! use negtrust_graph::graph::{TrustGraph, select_negative_nodes};
//! use negtrust_graph::metrics::{compute_centralities, aggregate::AggregatedCentrality};
//!
//! let graph = TrustGraph::from_edges(&edges);
//! let negatives = select_negative_nodes(&edges);
//! let record = compute_centralities(&graph, &negatives, &config.centrality)?;
//! let means = AggregatedCentrality::from_record(&record)?;
//! ```

pub mod aggregate;
pub mod betweenness;
pub mod degree;
pub mod eigenvector;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use negtrust_core::config::CentralityConfig;
use negtrust_core::error::{AnalysisError, AnalysisResult};
use negtrust_core::model::NodeId;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::{NegativeNodeSet, TrustGraph};

pub use aggregate::AggregatedCentrality;
pub use betweenness::betweenness_centrality;
pub use degree::{degree_centrality, raw_degrees};
pub use eigenvector::{EigenvectorResult, eigenvector_centrality};

/// Centrality measure names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Degree,
    Betweenness,
    Eigenvector,
}

impl Measure {
    /// Every measure, in reporting order.
    pub const ALL: [Self; 3] = [Self::Degree, Self::Betweenness, Self::Eigenvector];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-node centrality scores of the negative nodes, one map per measure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CentralityRecord {
    pub degree: BTreeMap<NodeId, f64>,
    pub betweenness: BTreeMap<NodeId, f64>,
    pub eigenvector: BTreeMap<NodeId, f64>,
}

impl CentralityRecord {
    /// Scores for one measure.
    #[must_use]
    pub const fn scores(&self, measure: Measure) -> &BTreeMap<NodeId, f64> {
        match measure {
            Measure::Degree => &self.degree,
            Measure::Betweenness => &self.betweenness,
            Measure::Eigenvector => &self.eigenvector,
        }
    }

    /// Number of nodes carried by the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.degree.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.degree.is_empty()
    }
}

/// Compute all three measures on `graph`, then keep only `negatives`.
///
/// # Errors
///
/// - [`AnalysisError::MissingNode`] if a negative node is not in `graph`.
/// - [`AnalysisError::DegenerateGraph`] if `graph` has fewer than two nodes.
/// - [`AnalysisError::Convergence`] if eigenvector centrality does not
///   settle within `config.max_iter` iterations.
#[instrument(skip_all, fields(nodes = graph.node_count(), negatives = negatives.len()))]
pub fn compute_centralities(
    graph: &TrustGraph,
    negatives: &NegativeNodeSet,
    config: &CentralityConfig,
) -> AnalysisResult<CentralityRecord> {
    if let Some(missing) = negatives.iter().find(|id| !graph.contains_node(*id)) {
        return Err(AnalysisError::MissingNode(missing));
    }

    let degree = degree_centrality(&graph.graph)?;
    let betweenness = betweenness_centrality(&graph.graph);
    let eigen = eigenvector_centrality(&graph.graph, config.max_iter, config.tolerance)?;
    debug!(iterations = eigen.iterations, "centralities computed");

    Ok(CentralityRecord {
        degree: restrict(&degree, negatives)?,
        betweenness: restrict(&betweenness, negatives)?,
        eigenvector: restrict(&eigen.scores, negatives)?,
    })
}

fn restrict(
    scores: &HashMap<NodeId, f64>,
    negatives: &NegativeNodeSet,
) -> AnalysisResult<BTreeMap<NodeId, f64>> {
    negatives
        .iter()
        .map(|id| {
            scores
                .get(&id)
                .map(|&score| (id, score))
                .ok_or(AnalysisError::MissingNode(id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use negtrust_core::model::{Sign, SignedEdge};

    use crate::graph::select_negative_nodes;

    fn cycle_edges() -> Vec<SignedEdge> {
        vec![
            SignedEdge::new(1_u64, 2_u64, Sign::Positive, 0),
            SignedEdge::new(2_u64, 3_u64, Sign::Negative, 1),
            SignedEdge::new(3_u64, 4_u64, Sign::Positive, 2),
            SignedEdge::new(4_u64, 1_u64, Sign::Negative, 3),
        ]
    }

    #[test]
    fn record_is_restricted_to_negatives() {
        let edges = cycle_edges();
        let graph = TrustGraph::from_edges(&edges);
        let negatives = select_negative_nodes(&edges);
        let record =
            compute_centralities(&graph, &negatives, &CentralityConfig::default()).expect("ok");

        assert_eq!(record.len(), 2);
        for measure in Measure::ALL {
            let ids: Vec<NodeId> = record.scores(measure).keys().copied().collect();
            assert_eq!(ids, vec![NodeId(1), NodeId(3)], "{measure}");
        }
        assert!((record.degree[&NodeId(1)] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn missing_node_is_reported() {
        let graph = TrustGraph::from_edges(&cycle_edges());
        let negatives: NegativeNodeSet = [NodeId(1), NodeId(99)].into_iter().collect();
        let err = compute_centralities(&graph, &negatives, &CentralityConfig::default())
            .expect_err("99 is absent");
        assert_eq!(err, AnalysisError::MissingNode(NodeId(99)));
    }

    #[test]
    fn empty_negative_set_gives_empty_record() {
        let graph = TrustGraph::from_edges(&cycle_edges());
        let record =
            compute_centralities(&graph, &NegativeNodeSet::default(), &CentralityConfig::default())
                .expect("ok");
        assert!(record.is_empty());
    }

    #[test]
    fn measure_names() {
        let names: Vec<&str> = Measure::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["degree", "betweenness", "eigenvector"]);
    }
}
