//! Diameter and average shortest path length.
//!
//! Both are unweighted and need every node to reach every other node: a
//! directed graph must be strongly connected. They are therefore
//! applicable, or not, together.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use negtrust_core::model::{Metric, NotApplicableReason};
use petgraph::EdgeType;
use petgraph::graph::Graph;

/// Path-length statistics of a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStats {
    pub diameter: Metric<usize>,
    pub average_shortest_path: Metric<f64>,
}

impl PathStats {
    const fn not_applicable(reason: NotApplicableReason) -> Self {
        Self {
            diameter: Metric::NotApplicable(reason),
            average_shortest_path: Metric::NotApplicable(reason),
        }
    }
}

/// BFS from every node along outgoing arcs.
#[must_use]
pub fn path_stats<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>) -> PathStats {
    let n = graph.node_count();
    if n < 2 {
        return PathStats::not_applicable(NotApplicableReason::TooFewNodes);
    }

    let mut diameter = 0_usize;
    let mut total = 0_usize;
    let mut dist = vec![0_usize; n];
    let mut seen = FixedBitSet::with_capacity(n);
    let mut queue = VecDeque::with_capacity(n);

    for source in graph.node_indices() {
        seen.clear();
        seen.insert(source.index());
        dist[source.index()] = 0;
        queue.push_back(source);
        let mut reached = 1_usize;

        while let Some(v) = queue.pop_front() {
            let next = dist[v.index()] + 1;
            for w in graph.neighbors(v) {
                if !seen.put(w.index()) {
                    dist[w.index()] = next;
                    reached += 1;
                    total += next;
                    diameter = diameter.max(next);
                    queue.push_back(w);
                }
            }
        }

        if reached < n {
            return PathStats::not_applicable(NotApplicableReason::Disconnected);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average = total as f64 / (n * (n - 1)) as f64;
    PathStats {
        diameter: Metric::Value(diameter),
        average_shortest_path: Metric::Value(average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, UnGraph};

    fn digraph(n: usize, edges: &[(u32, u32)]) -> DiGraph<(), ()> {
        let mut g = DiGraph::new();
        for _ in 0..n {
            g.add_node(());
        }
        g.extend_with_edges(edges);
        g
    }

    #[test]
    fn directed_cycle_with_chord() {
        let g = digraph(3, &[(0, 1), (0, 2), (1, 2), (2, 0)]);
        let stats = path_stats(&g);
        assert_eq!(stats.diameter, Metric::Value(2));
        let aspl = stats.average_shortest_path.value().expect("connected");
        assert!((aspl - 8.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn weakly_connected_digraph_is_disconnected() {
        let g = digraph(3, &[(0, 1), (1, 2)]);
        let stats = path_stats(&g);
        assert_eq!(stats.diameter.reason(), Some(NotApplicableReason::Disconnected));
        assert_eq!(
            stats.average_shortest_path.reason(),
            Some(NotApplicableReason::Disconnected)
        );
    }

    #[test]
    fn undirected_path_graph() {
        let mut g = UnGraph::<(), ()>::new_undirected();
        for _ in 0..4 {
            g.add_node(());
        }
        g.extend_with_edges([(0_u32, 1_u32), (1, 2), (2, 3)]);
        let stats = path_stats(&g);
        assert_eq!(stats.diameter, Metric::Value(3));
        // Distances: 1,2,3,1,2,1 each counted both ways = 20 / 12.
        let aspl = stats.average_shortest_path.value().expect("connected");
        assert!((aspl - 20.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn single_node_has_too_few_nodes() {
        let g = digraph(1, &[]);
        let stats = path_stats(&g);
        assert_eq!(stats.diameter.reason(), Some(NotApplicableReason::TooFewNodes));
        assert!(stats.average_shortest_path.is_not_applicable());
    }
}
