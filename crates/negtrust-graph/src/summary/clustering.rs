//! Local and average clustering coefficients.
//!
//! - **Undirected**: `T(v) / (d(v) * (d(v) - 1))`, where `d(v)` is the
//!   number of distinct neighbours and `T(v)` counts, for every neighbour
//!   `w`, the neighbours of `v` that are also neighbours of `w`.
//! - **Directed** (Fagiolo 2007): `t(v) / (2 * (d_tot(v) * (d_tot(v) - 1) - 2 * d_bi(v)))`,
//!   where `t(v)` counts directed triangles through `v`, `d_tot` is the sum
//!   of distinct predecessors and successors, and `d_bi` the number of
//!   reciprocated neighbours.
//!
//! Self-loops never contribute. Nodes that close no triangle score 0.

use fixedbitset::FixedBitSet;
use petgraph::graph::Graph;
use petgraph::{Direction, EdgeType};

/// Neighbour bitsets of every node, self excluded.
fn neighbour_sets<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>, dir: Direction) -> Vec<FixedBitSet> {
    let n = graph.node_count();
    graph
        .node_indices()
        .map(|v| {
            let mut set = FixedBitSet::with_capacity(n);
            for w in graph.neighbors_directed(v, dir) {
                if w != v {
                    set.insert(w.index());
                }
            }
            set
        })
        .collect()
}

fn common(a: &FixedBitSet, b: &FixedBitSet) -> usize {
    a.intersection(b).count()
}

/// Local clustering coefficient of every node, indexed by `NodeIndex::index()`.
#[must_use]
pub fn local_clustering<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>) -> Vec<f64> {
    if graph.is_directed() {
        directed_clustering(graph)
    } else {
        undirected_clustering(graph)
    }
}

/// Mean of [`local_clustering`], or `None` for a graph without nodes.
#[must_use]
pub fn average_clustering<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>) -> Option<f64> {
    let local = local_clustering(graph);
    if local.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = local.len() as f64;
    Some(local.iter().sum::<f64>() / n)
}

#[allow(clippy::cast_precision_loss)]
fn undirected_clustering<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>) -> Vec<f64> {
    let nbrs = neighbour_sets(graph, Direction::Outgoing);
    nbrs.iter()
        .map(|vs| {
            let d = vs.count_ones(..);
            let triangles: usize = vs.ones().map(|w| common(vs, &nbrs[w])).sum();
            if triangles == 0 {
                0.0
            } else {
                triangles as f64 / (d * (d - 1)) as f64
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn directed_clustering<N, E, Ty: EdgeType>(graph: &Graph<N, E, Ty>) -> Vec<f64> {
    let preds = neighbour_sets(graph, Direction::Incoming);
    let succs = neighbour_sets(graph, Direction::Outgoing);

    (0..graph.node_count())
        .map(|i| {
            let (ip, is) = (&preds[i], &succs[i]);
            let triangles: usize = ip
                .ones()
                .chain(is.ones())
                .map(|j| {
                    let (jp, js) = (&preds[j], &succs[j]);
                    common(ip, jp) + common(ip, js) + common(is, jp) + common(is, js)
                })
                .sum();
            if triangles == 0 {
                return 0.0;
            }
            let total = ip.count_ones(..) + is.count_ones(..);
            let bidirectional = common(ip, is);
            triangles as f64 / (2 * (total * (total - 1) - 2 * bidirectional)) as f64
        })
        .collect()
}
