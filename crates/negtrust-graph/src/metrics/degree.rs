//! Normalized degree centrality.
//!
//! `deg(v) / (n - 1)` where `deg(v)` counts every arc endpoint at `v`. On a
//! directed graph that is in-degree plus out-degree; a self-loop touches
//! its node twice. On an undirected graph it is the ordinary degree.
//!
//! Reciprocal arcs count separately, so a directed node can score above 1.

use std::collections::HashMap;

use negtrust_core::error::{AnalysisError, AnalysisResult};
use negtrust_core::model::NodeId;
use petgraph::EdgeType;
use petgraph::graph::Graph;
use petgraph::visit::EdgeRef;
use tracing::instrument;

use super::Measure;

/// Unnormalized degree of every node, indexed by `NodeIndex::index()`.
#[must_use]
pub fn raw_degrees<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>) -> Vec<usize> {
    let mut degrees = vec![0_usize; graph.node_count()];
    for edge in graph.edge_references() {
        degrees[edge.source().index()] += 1;
        degrees[edge.target().index()] += 1;
    }
    degrees
}

/// Degree centrality for every node.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateGraph`] when the graph has fewer than
/// two nodes.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn degree_centrality<E, Ty: EdgeType>(
    graph: &Graph<NodeId, E, Ty>,
) -> AnalysisResult<HashMap<NodeId, f64>> {
    let n = graph.node_count();
    if n <= 1 {
        return Err(AnalysisError::DegenerateGraph {
            measure: Measure::Degree.name(),
            nodes: n,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / (n - 1) as f64;
    let degrees = raw_degrees(graph);

    #[allow(clippy::cast_precision_loss)]
    let scores = graph
        .node_indices()
        .map(|idx| (graph[idx], degrees[idx.index()] as f64 * scale))
        .collect();
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use negtrust_core::model::{Sign, SignedEdge};
    use petgraph::graph::{DiGraph, UnGraph};

    use crate::graph::TrustGraph;

    fn cycle4() -> TrustGraph {
        TrustGraph::from_edges(&[
            SignedEdge::new(1_u64, 2_u64, Sign::Positive, 0),
            SignedEdge::new(2_u64, 3_u64, Sign::Negative, 1),
            SignedEdge::new(3_u64, 4_u64, Sign::Positive, 2),
            SignedEdge::new(4_u64, 1_u64, Sign::Negative, 3),
        ])
    }

    #[test]
    fn directed_cycle_degree_is_two_thirds() {
        let dc = degree_centrality(&cycle4().graph).expect("4 nodes");
        for id in 1..=4 {
            assert!((dc[&NodeId(id)] - 2.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn single_node_is_degenerate() {
        let mut g = DiGraph::<NodeId, Sign>::new();
        g.add_node(NodeId(1));
        let err = degree_centrality(&g).expect_err("degenerate");
        assert_eq!(
            err,
            AnalysisError::DegenerateGraph {
                measure: "degree",
                nodes: 1
            }
        );
    }

    #[test]
    fn empty_graph_is_degenerate() {
        let g = DiGraph::<NodeId, Sign>::new();
        assert!(matches!(
            degree_centrality(&g),
            Err(AnalysisError::DegenerateGraph { nodes: 0, .. })
        ));
    }

    #[test]
    fn self_loop_counts_twice() {
        let g = TrustGraph::from_edges(&[
            SignedEdge::new(1_u64, 1_u64, Sign::Negative, 0),
            SignedEdge::new(1_u64, 2_u64, Sign::Positive, 0),
        ]);
        let degrees = raw_degrees(&g.graph);
        let one = g.node_index(NodeId(1)).expect("node 1").index();
        assert_eq!(degrees[one], 3);
    }

    #[test]
    fn undirected_star_center_is_one() {
        let mut g = UnGraph::<NodeId, ()>::new_undirected();
        let c = g.add_node(NodeId(0));
        for i in 1..=4 {
            let leaf = g.add_node(NodeId(i));
            g.add_edge(c, leaf, ());
        }
        let dc = degree_centrality(&g).expect("5 nodes");
        assert!((dc[&NodeId(0)] - 1.0).abs() < 1e-12);
        assert!((dc[&NodeId(3)] - 0.25).abs() < 1e-12);
    }
}
