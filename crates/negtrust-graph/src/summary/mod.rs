//! Whole-graph descriptive statistics.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the graph.
//! - **average_clustering**: mean local clustering coefficient, directed
//!   or undirected formula depending on the graph.
//! - **modularity**: Newman modularity of the label-propagation
//!   communities. Undirected graphs only.
//! - **community_count**: number of label-propagation communities.
//!   Undirected graphs only.
//! - **connected_components**: undirected graphs only.
//! - **density**: `m / (n(n-1))` directed, `2m / (n(n-1))` undirected,
//!   0.0 for fewer than two nodes.
//! - **diameter** / **average_shortest_path**: unweighted, only for
//!   (strongly) connected graphs with at least two nodes.
//! - **degree_histogram**: fixed-width buckets, degrees past the last
//!   bucket clamped into it.
//!
//! Every statistic is computed from the input graph alone. A statistic
//! whose precondition fails is a [`Metric::NotApplicable`], never an error.

pub mod clustering;
pub mod community;
pub mod histogram;
pub mod paths;

use negtrust_core::config::SummaryConfig;
use negtrust_core::error::AnalysisResult;
use negtrust_core::model::{Metric, NotApplicableReason};
use petgraph::EdgeType;
use petgraph::algo::connected_components;
use petgraph::graph::Graph;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::metrics::raw_degrees;

pub use histogram::DegreeBucket;

// ---------------------------------------------------------------------------
// NetworkSummary
// ---------------------------------------------------------------------------

/// Summary statistics for a trust graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub directed: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub average_clustering: Metric<f64>,
    pub modularity: Metric<f64>,
    pub community_count: Metric<usize>,
    pub connected_components: Metric<usize>,
    pub density: f64,
    pub diameter: Metric<usize>,
    pub average_shortest_path: Metric<f64>,
    pub degree_histogram: Vec<DegreeBucket>,
}

impl NetworkSummary {
    /// Compute every statistic for `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`negtrust_core::AnalysisError::InvalidBinCount`] when the
    /// configured histogram bucket width is zero or exceeds the maximum
    /// degree.
    #[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
    pub fn analyze<N, E, Ty: EdgeType>(
        graph: &Graph<N, E, Ty>,
        config: &SummaryConfig,
    ) -> AnalysisResult<Self> {
        let directed = graph.is_directed();
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let average_clustering = clustering::average_clustering(graph)
            .map_or(Metric::NotApplicable(NotApplicableReason::EmptyGraph), Metric::Value);
        debug!(%average_clustering, "clustering");

        let (modularity, community_count) = if directed {
            (
                Metric::NotApplicable(NotApplicableReason::Directed),
                Metric::NotApplicable(NotApplicableReason::Directed),
            )
        } else {
            let labels = community::label_propagation(
                graph,
                config.label_propagation_seed,
                config.label_propagation_max_rounds,
            );
            let q = community::modularity(graph, &labels)
                .map_or(Metric::NotApplicable(NotApplicableReason::NoEdges), Metric::Value);
            (q, Metric::Value(community::community_count(&labels)))
        };
        debug!(%modularity, %community_count, "communities");

        let connected_components = if directed {
            Metric::NotApplicable(NotApplicableReason::Directed)
        } else {
            Metric::Value(connected_components(graph))
        };

        let density = density(node_count, edge_count, directed);

        let paths = paths::path_stats(graph);
        debug!(diameter = %paths.diameter, "paths");

        let degree_histogram = histogram::degree_histogram(
            &raw_degrees(graph),
            config.histogram_bucket_width,
            config.histogram_max_degree,
        )?;

        Ok(Self {
            directed,
            node_count,
            edge_count,
            average_clustering,
            modularity,
            community_count,
            connected_components,
            density,
            diameter: paths.diameter,
            average_shortest_path: paths.average_shortest_path,
            degree_histogram,
        })
    }
}

/// Edge density of a simple graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(node_count: usize, edge_count: usize, directed: bool) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let pairs = (node_count * (node_count - 1)) as f64;
    let edges = edge_count as f64;
    if directed { edges / pairs } else { 2.0 * edges / pairs }
}
