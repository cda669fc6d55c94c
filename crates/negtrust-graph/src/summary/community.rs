//! Community detection by label propagation, and modularity scoring.
//!
//! Both functions treat the graph as undirected and unweighted; callers
//! only use them on undirected graphs.

use petgraph::EdgeType;
use petgraph::graph::Graph;
use petgraph::visit::EdgeRef;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::metrics::raw_degrees;

/// Asynchronous label propagation.
///
/// Every node starts with its own label. Each round visits the nodes in a
/// shuffled order (seeded, so runs are reproducible) and sets each node's
/// label to the most frequent label among its neighbours. On a tie the
/// node keeps its current label when that label is among the most
/// frequent, and otherwise takes the smallest tied label. Isolated nodes
/// keep their own label.
///
/// Stops after a round with no change or after `max_rounds` rounds.
/// Returns one label per node, indexed by `NodeIndex::index()`.
#[must_use]
pub fn label_propagation<N, E, Ty: EdgeType>(
    graph: &Graph<N, E, Ty>,
    seed: u64,
    max_rounds: usize,
) -> Vec<usize> {
    let n = graph.node_count();
    let mut labels: Vec<usize> = (0..n).collect();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);

    let neighbours: Vec<Vec<usize>> = graph
        .node_indices()
        .map(|v| {
            graph
                .neighbors_undirected(v)
                .filter(|&w| w != v)
                .map(|w| w.index())
                .collect()
        })
        .collect();

    // label -> frequency scratch space, reset after each node.
    let mut freq: Vec<usize> = vec![0; n];

    for round in 0..max_rounds {
        order.shuffle(&mut rng);
        let mut changed = false;

        for &v in &order {
            if neighbours[v].is_empty() {
                continue;
            }
            for &w in &neighbours[v] {
                freq[labels[w]] += 1;
            }
            let best = neighbours[v].iter().map(|&w| freq[labels[w]]).max().unwrap_or(0);
            let current = labels[v];
            let next = if freq[current] == best {
                current
            } else {
                neighbours[v]
                    .iter()
                    .map(|&w| labels[w])
                    .filter(|&l| freq[l] == best)
                    .min()
                    .unwrap_or(current)
            };
            for &w in &neighbours[v] {
                freq[labels[w]] = 0;
            }
            if next != current {
                labels[v] = next;
                changed = true;
            }
        }

        if !changed {
            debug!(rounds = round + 1, "label propagation settled");
            break;
        }
    }

    labels
}

/// Number of distinct labels.
#[must_use]
pub fn community_count(labels: &[usize]) -> usize {
    let mut seen = labels.to_vec();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Newman modularity of a partition.
///
/// `Q = Σ_c [ L_c / m - (d_c / 2m)² ]` with `L_c` the edges inside
/// community `c`, `d_c` the degree sum of its members and `m` the edge
/// count. Returns `None` when the graph has no edges.
#[must_use]
pub fn modularity<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>, labels: &[usize]) -> Option<f64> {
    let m = graph.edge_count();
    if m == 0 {
        return None;
    }

    let n = graph.node_count();
    let mut internal = vec![0_usize; n];
    let mut degree_sum = vec![0_usize; n];

    for (v, d) in raw_degrees(graph).into_iter().enumerate() {
        degree_sum[labels[v]] += d;
    }
    for edge in graph.edge_references() {
        let (a, b) = (labels[edge.source().index()], labels[edge.target().index()]);
        if a == b {
            internal[a] += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let m = m as f64;
    #[allow(clippy::cast_precision_loss)]
    let q = internal
        .iter()
        .zip(&degree_sum)
        .map(|(&l, &d)| {
            let share = d as f64 / (2.0 * m);
            l as f64 / m - share * share
        })
        .sum();
    Some(q)
}
