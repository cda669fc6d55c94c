//! Trust graph construction from signed edges.
//!
//! # Overview
//!
//! [`TrustGraph`] is a [`petgraph`] directed graph whose nodes are actor
//! ids and whose arc weights are trust [`Sign`]s. An arc `A → B` means
//! "A rated B".
//!
//! ## One Arc Per Ordered Pair
//!
//! Repeated ratings of the same target by the same source collapse to a
//! single arc. The sign of the **last** edge in input order wins, so
//! building from a period's edge list yields the latest opinion within
//! that period. No reverse arc is ever implied.
//!
//! ## Self-Loops
//!
//! Self-rating edges are kept as self-loop arcs.
//!
//! ## Content Hash
//!
//! Every graph carries a BLAKE3 hash of its sorted arc set. Two graphs
//! built from different edge lists that resolve to the same arcs hash
//! identically, which makes the hash usable as a cache key for per-period
//! results.

use std::collections::HashMap;

use negtrust_core::error::{AnalysisError, AnalysisResult};
use negtrust_core::model::{NodeId, Sign, SignedEdge};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::instrument;

// ---------------------------------------------------------------------------
// TrustGraph
// ---------------------------------------------------------------------------

/// A directed, sign-weighted trust graph.
#[derive(Debug, Clone)]
pub struct TrustGraph {
    /// Directed graph: nodes = actor ids, arc weights = trust signs.
    pub graph: DiGraph<NodeId, Sign>,
    /// Mapping from actor id to petgraph `NodeIndex`.
    pub node_map: HashMap<NodeId, NodeIndex>,
    /// BLAKE3 content hash of the arc set.
    pub content_hash: String,
}

impl TrustGraph {
    /// Build a graph from `edges`. An empty slice yields an empty graph.
    #[must_use]
    #[instrument(skip(edges), fields(edges = edges.len()))]
    pub fn from_edges(edges: &[SignedEdge]) -> Self {
        let mut builder = Builder::default();
        for edge in edges {
            builder.arc(edge.from, edge.to, edge.sign);
        }
        builder.finish()
    }

    /// Like [`TrustGraph::from_edges`] but requires at least one edge.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyInput`] if `edges` is empty.
    pub fn from_edges_non_empty(edges: &[SignedEdge]) -> AnalysisResult<Self> {
        if edges.is_empty() {
            return Err(AnalysisError::EmptyInput("graph construction needs at least one edge"));
        }
        Ok(Self::from_edges(edges))
    }

    /// Build from an explicit node list plus arcs.
    ///
    /// Nodes are inserted first (so isolated nodes survive), then arcs with
    /// last-write-wins semantics. Arc endpoints missing from `nodes` are
    /// added on the fly.
    #[must_use]
    pub fn from_parts(
        nodes: impl IntoIterator<Item = NodeId>,
        arcs: impl IntoIterator<Item = (NodeId, NodeId, Sign)>,
    ) -> Self {
        let mut builder = Builder::default();
        for id in nodes {
            builder.node(id);
        }
        for (from, to, sign) in arcs {
            builder.arc(from, to, sign);
        }
        builder.finish()
    }

    /// Return the number of nodes (actors) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of arcs in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for an actor id.
    #[must_use]
    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_map.get(&id).copied()
    }

    /// Return the actor id for a node.
    #[must_use]
    pub fn node_id(&self, idx: NodeIndex) -> Option<NodeId> {
        self.graph.node_weight(idx).copied()
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    /// Sign of the arc `from → to`, if present.
    #[must_use]
    pub fn sign(&self, from: NodeId, to: NodeId) -> Option<Sign> {
        let a = self.node_index(from)?;
        let b = self.node_index(to)?;
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// All actor ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().copied()
    }

    /// All arcs as `(from, to, sign)`, sorted by endpoints.
    #[must_use]
    pub fn arcs(&self) -> Vec<(NodeId, NodeId, Sign)> {
        let mut arcs: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()], *e.weight()))
            .collect();
        arcs.sort_unstable_by_key(|&(from, to, _)| (from, to));
        arcs
    }

    /// Undirected projection of this graph.
    ///
    /// Node indices are preserved. Reciprocal arcs `A → B` and `B → A`
    /// merge into one edge carrying the sign of whichever arc was inserted
    /// later.
    #[must_use]
    pub fn undirected(&self) -> UnGraph<NodeId, Sign> {
        let mut ug = UnGraph::<NodeId, Sign>::with_capacity(
            self.graph.node_count(),
            self.graph.edge_count(),
        );
        for id in self.graph.node_weights() {
            ug.add_node(*id);
        }
        for e in self.graph.edge_references() {
            ug.update_edge(e.source(), e.target(), *e.weight());
        }
        ug
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Builder {
    graph: DiGraph<NodeId, Sign>,
    node_map: HashMap<NodeId, NodeIndex>,
}

impl Builder {
    fn node(&mut self, id: NodeId) -> NodeIndex {
        let graph = &mut self.graph;
        *self.node_map.entry(id).or_insert_with(|| graph.add_node(id))
    }

    fn arc(&mut self, from: NodeId, to: NodeId, sign: Sign) {
        let a = self.node(from);
        let b = self.node(to);
        // update_edge overwrites the weight of an existing a → b arc.
        self.graph.update_edge(a, b, sign);
    }

    fn finish(self) -> TrustGraph {
        let mut graph = TrustGraph {
            graph: self.graph,
            node_map: self.node_map,
            content_hash: String::new(),
        };
        graph.content_hash = compute_arc_hash(&graph.arcs());
        graph
    }
}

/// Compute a BLAKE3 hash of the sorted arc list.
fn compute_arc_hash(arcs: &[(NodeId, NodeId, Sign)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (from, to, sign) in arcs {
        hasher.update(&from.0.to_le_bytes());
        hasher.update(&to.0.to_le_bytes());
        hasher.update(&sign.weight().to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn e(from: u64, to: u64, sign: Sign) -> SignedEdge {
        SignedEdge::new(from, to, sign, 0)
    }

    #[test]
    fn empty_edges_produce_empty_graph() {
        let g = TrustGraph::from_edges(&[]);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert!(g.content_hash.starts_with("blake3:"));
    }

    #[test]
    fn non_empty_builder_rejects_empty_input() {
        assert!(matches!(
            TrustGraph::from_edges_non_empty(&[]),
            Err(AnalysisError::EmptyInput(_))
        ));
    }

    #[test]
    fn single_arc_direction() {
        let g = TrustGraph::from_edges(&[e(1, 2, Sign::Negative)]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.sign(NodeId(1), NodeId(2)), Some(Sign::Negative));
        assert_eq!(g.sign(NodeId(2), NodeId(1)), None, "no reverse arc");
    }

    #[test]
    fn later_edge_overwrites_sign() {
        let g = TrustGraph::from_edges(&[
            e(1, 2, Sign::Positive),
            e(1, 2, Sign::Negative),
            e(1, 2, Sign::Positive),
        ]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.sign(NodeId(1), NodeId(2)), Some(Sign::Positive));
    }

    #[test]
    fn self_loops_preserved() {
        let g = TrustGraph::from_edges(&[e(5, 5, Sign::Negative)]);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.sign(NodeId(5), NodeId(5)), Some(Sign::Negative));
    }

    #[test]
    fn disconnected_components_kept() {
        let g = TrustGraph::from_edges(&[e(1, 2, Sign::Positive), e(3, 4, Sign::Positive)]);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn from_parts_keeps_isolated_nodes() {
        let g = TrustGraph::from_parts(
            [NodeId(9), NodeId(1)],
            [(NodeId(1), NodeId(2), Sign::Negative)],
        );
        assert_eq!(g.node_count(), 3);
        assert!(g.contains_node(NodeId(9)));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn content_hash_tracks_arcs_not_input_order() {
        let a = TrustGraph::from_edges(&[e(1, 2, Sign::Positive), e(2, 3, Sign::Negative)]);
        let b = TrustGraph::from_edges(&[e(2, 3, Sign::Negative), e(1, 2, Sign::Positive)]);
        let c = TrustGraph::from_edges(&[e(1, 2, Sign::Positive), e(2, 3, Sign::Positive)]);
        assert_eq!(a.content_hash, b.content_hash);
        assert_ne!(a.content_hash, c.content_hash, "sign change must change hash");
    }

    #[test]
    fn undirected_merges_reciprocal_arcs() {
        let g = TrustGraph::from_edges(&[
            e(1, 2, Sign::Positive),
            e(2, 1, Sign::Negative),
            e(2, 3, Sign::Positive),
        ]);
        let ug = g.undirected();
        assert_eq!(ug.node_count(), 3);
        assert_eq!(ug.edge_count(), 2);
        let a = g.node_index(NodeId(1)).expect("node 1");
        let b = g.node_index(NodeId(2)).expect("node 2");
        let edge = ug.find_edge(a, b).expect("merged edge");
        assert_eq!(ug[edge], Sign::Negative, "later arc wins");
    }
}
