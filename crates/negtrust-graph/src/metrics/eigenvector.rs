//! Eigenvector centrality via power iteration.
//!
//! # Algorithm
//!
//! Power iteration on `(A + I)ᵀ`, where `A` is the arc adjacency matrix:
//!
//! 1. Initialize scores uniformly to `1/n`.
//! 2. Each step starts from a copy of the previous scores and, for every
//!    arc `u → v`, adds `score(u)` to `score(v)`. A node is important when
//!    important nodes point at it.
//! 3. Normalize to unit L2 norm.
//! 4. Stop once the L1 change is below `n * tolerance`.
//!
//! Arc signs are ignored. Nodes no path reaches decay towards zero.
//!
//! Running out of iterations is an error, never a zero vector.

use std::collections::HashMap;

use negtrust_core::error::{AnalysisError, AnalysisResult};
use negtrust_core::model::NodeId;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use super::Measure;

/// Result of a converged eigenvector computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: node id → score.
    pub scores: HashMap<NodeId, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Compute eigenvector centrality for all nodes.
///
/// # Errors
///
/// - [`AnalysisError::EmptyInput`] for a graph without nodes.
/// - [`AnalysisError::Convergence`] when the scores have not settled after
///   `max_iter` iterations.
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn eigenvector_centrality<E>(
    graph: &DiGraph<NodeId, E>,
    max_iter: usize,
    tolerance: f64,
) -> AnalysisResult<EigenvectorResult> {
    let n = graph.node_count();
    if n == 0 {
        return Err(AnalysisError::EmptyInput(
            "eigenvector centrality of a graph without nodes",
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let n_f = n as f64;
    let mut scores: Vec<f64> = vec![1.0 / n_f; n];

    for iter in 0..max_iter {
        let mut next = scores.clone();
        for edge in graph.edge_references() {
            next[edge.target().index()] += scores[edge.source().index()];
        }

        let norm: f64 = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut next {
                *x /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;

        if diff < n_f * tolerance {
            debug!(iterations = iter + 1, "eigenvector centrality converged");
            let scores = graph
                .node_indices()
                .map(|idx| (graph[idx], scores[idx.index()]))
                .collect();
            return Ok(EigenvectorResult {
                scores,
                iterations: iter + 1,
            });
        }
    }

    Err(AnalysisError::Convergence {
        measure: Measure::Eigenvector.name(),
        iterations: max_iter,
    })
}
