//! Negative-node selection and subgraph extraction.
//!
//! A node is *negative* when it is the target of at least one edge with a
//! negative sign. The set is always computed from the same edge collection
//! that built the graph it is paired with, so within the pipeline it is
//! period-scoped.

use std::collections::BTreeSet;

use negtrust_core::model::{NodeId, SignedEdge};
use serde::Serialize;
use tracing::{debug, instrument};

use super::build::TrustGraph;

/// Ordered set of negative node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NegativeNodeSet(BTreeSet<NodeId>);

impl NegativeNodeSet {
    /// Targets of every negative edge in `edges`.
    #[must_use]
    pub fn from_edges(edges: &[SignedEdge]) -> Self {
        Self(
            edges
                .iter()
                .filter(|e| e.sign.is_negative())
                .map(|e| e.to)
                .collect(),
        )
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<NodeId> for NegativeNodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Select the negative nodes of an edge collection.
///
/// Empty input yields an empty set.
#[must_use]
#[instrument(skip(edges), fields(edges = edges.len()))]
pub fn select_negative_nodes(edges: &[SignedEdge]) -> NegativeNodeSet {
    let set = NegativeNodeSet::from_edges(edges);
    debug!(negative = set.len(), "selected negative nodes");
    set
}

/// Restrict `graph` to the arcs touching `negatives`.
///
/// Every member of `negatives` becomes a node of the result, isolated if
/// necessary, even when it is absent from `graph`. Every arc of `graph`
/// with at least one endpoint in the set is copied with its sign.
#[must_use]
#[instrument(skip_all, fields(nodes = graph.node_count(), negatives = negatives.len()))]
pub fn extract_subgraph(graph: &TrustGraph, negatives: &NegativeNodeSet) -> TrustGraph {
    let arcs = graph
        .arcs()
        .into_iter()
        .filter(|&(from, to, _)| negatives.contains(from) || negatives.contains(to));
    let sub = TrustGraph::from_parts(negatives.iter(), arcs);
    debug!(
        sub_nodes = sub.node_count(),
        sub_edges = sub.edge_count(),
        "extracted negative subgraph"
    );
    sub
}

#[cfg(test)]
mod tests {
    use super::*;
    use negtrust_core::model::Sign;

    fn e(from: u64, to: u64, sign: Sign) -> SignedEdge {
        SignedEdge::new(from, to, sign, 0)
    }

    #[test]
    fn empty_input_gives_empty_set() {
        assert!(select_negative_nodes(&[]).is_empty());
    }

    #[test]
    fn only_targets_of_negative_edges() {
        let edges = [
            e(1, 2, Sign::Positive),
            e(2, 3, Sign::Negative),
            e(3, 4, Sign::Positive),
            e(4, 1, Sign::Negative),
            e(5, 3, Sign::Negative),
            e(6, 7, Sign::Neutral),
        ];
        let set = select_negative_nodes(&edges);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![NodeId(1), NodeId(3)]);
        assert!(!set.contains(NodeId(2)), "sources are never selected");
    }

    #[test]
    fn subgraph_keeps_touching_arcs_with_signs() {
        let edges = [
            e(1, 2, Sign::Positive),
            e(2, 3, Sign::Negative),
            e(3, 4, Sign::Positive),
            e(5, 6, Sign::Positive),
        ];
        let graph = TrustGraph::from_edges(&edges);
        let set = select_negative_nodes(&edges);
        let sub = extract_subgraph(&graph, &set);

        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 2);
        assert_eq!(sub.sign(NodeId(2), NodeId(3)), Some(Sign::Negative));
        assert_eq!(sub.sign(NodeId(3), NodeId(4)), Some(Sign::Positive));
        assert!(!sub.contains_node(NodeId(5)));
    }

    #[test]
    fn isolated_negative_nodes_survive() {
        let graph = TrustGraph::from_edges(&[e(1, 2, Sign::Positive)]);
        let set: NegativeNodeSet = [NodeId(9)].into_iter().collect();
        let sub = extract_subgraph(&graph, &set);
        assert_eq!(sub.node_count(), 1);
        assert_eq!(sub.edge_count(), 0);
        assert!(sub.contains_node(NodeId(9)));
    }
}
