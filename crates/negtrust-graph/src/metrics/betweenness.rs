//! Betweenness centrality via Brandes' algorithm.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS along outgoing arcs to compute
//!    shortest-path counts and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest first).
//! 3. Sum the dependency scores across all sources.
//!
//! Complexity: O(V * E). Arc signs are ignored.
//!
//! # Normalization
//!
//! Scores are divided by `(n-1)*(n-2)`, the number of ordered pairs that
//! exclude the node itself, when `n > 2`. Smaller graphs have no paths
//! through any node and every score is 0.

use std::collections::{HashMap, VecDeque};

use negtrust_core::model::NodeId;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::instrument;

/// Normalized betweenness centrality for every node.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn betweenness_centrality<E>(graph: &DiGraph<NodeId, E>) -> HashMap<NodeId, f64> {
    let n = graph.node_count();
    if n == 0 {
        return HashMap::new();
    }

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in graph.node_indices() {
        let si = s.index();

        // Nodes in order of discovery (farthest popped first).
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        // dist[t]: distance from s to t (None = unvisited).
        let mut dist: Vec<Option<usize>> = vec![None; n];
        dist[si] = Some(0);

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = v.index();
            stack.push(v);
            let next = dist[vi].map_or(0, |d| d + 1);

            for w in graph.neighbors_directed(v, Direction::Outgoing) {
                let wi = w.index();

                if dist[wi].is_none() {
                    dist[wi] = Some(next);
                    queue.push_back(w);
                }

                if dist[wi] == Some(next) {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = w.index();

            for &v in &predecessors[wi] {
                let vi = v.index();
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = if n > 2 {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        1.0
    };

    graph
        .node_indices()
        .map(|idx| (graph[idx], cb[idx.index()] * scale))
        .collect()
}
