//! Temporal centrality pipeline.
//!
//! ```text
//! &[SignedEdge]
//!     ↓  PeriodSegmenter::from_edges()      (global bounds, computed once)
//! Vec<Vec<SignedEdge>>                      (one edge list per period)
//!     ↓  analyze_period()                   (sequential or rayon, per period)
//!     │     TrustGraph → NegativeNodeSet → negative subgraph
//!     │     compute_centralities() → AggregatedCentrality | hole
//!     ↓  TimeSeriesAssembler                (single owner, period order)
//! Timeline
//! ```
//!
//! Periods share nothing but the read-only segmenter, so running them in
//! parallel yields the same timeline as running them in order.

use negtrust_core::config::{AnalysisConfig, CentralityConfig, ConvergencePolicy};
use negtrust_core::error::{AnalysisError, AnalysisResult};
use negtrust_core::model::SignedEdge;
use negtrust_core::time::{PeriodBounds, PeriodIndex, PeriodSegmenter};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::graph::{TrustGraph, extract_subgraph, select_negative_nodes};
use crate::metrics::{AggregatedCentrality, compute_centralities};
use crate::series::{HoleReason, PeriodEntry, TimeSeries, TimeSeriesAssembler};

/// Shape of one period's graphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSnapshot {
    pub period: PeriodIndex,
    pub bounds: PeriodBounds,
    pub edge_count: usize,
    pub node_count: usize,
    pub arc_count: usize,
    pub negative_count: usize,
    pub subgraph_node_count: usize,
    pub subgraph_arc_count: usize,
    /// Content hash of the period graph; `None` for an empty period.
    pub content_hash: Option<String>,
}

/// Snapshot plus series entry for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodOutcome {
    pub snapshot: PeriodSnapshot,
    pub entry: PeriodEntry,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub start: i64,
    pub end: i64,
    pub snapshots: Vec<PeriodSnapshot>,
    pub series: TimeSeries,
}

/// Analyze a single period's edges.
///
/// # Errors
///
/// Returns [`AnalysisError::Convergence`] when eigenvector centrality fails
/// and the policy is [`ConvergencePolicy::Abort`]. Every other expected
/// condition becomes a hole.
#[instrument(skip(edges, bounds, config), fields(edges = edges.len()))]
pub fn analyze_period(
    period: PeriodIndex,
    bounds: PeriodBounds,
    edges: &[SignedEdge],
    config: &CentralityConfig,
) -> AnalysisResult<PeriodOutcome> {
    if edges.is_empty() {
        return Ok(PeriodOutcome {
            snapshot: PeriodSnapshot {
                period,
                bounds,
                edge_count: 0,
                node_count: 0,
                arc_count: 0,
                negative_count: 0,
                subgraph_node_count: 0,
                subgraph_arc_count: 0,
                content_hash: None,
            },
            entry: PeriodEntry::hole(HoleReason::EmptyPeriod),
        });
    }

    let graph = TrustGraph::from_edges(edges);
    let negatives = select_negative_nodes(edges);
    let subgraph = extract_subgraph(&graph, &negatives);

    let snapshot = PeriodSnapshot {
        period,
        bounds,
        edge_count: edges.len(),
        node_count: graph.node_count(),
        arc_count: graph.edge_count(),
        negative_count: negatives.len(),
        subgraph_node_count: subgraph.node_count(),
        subgraph_arc_count: subgraph.edge_count(),
        content_hash: Some(graph.content_hash.clone()),
    };

    if negatives.is_empty() {
        return Ok(PeriodOutcome {
            snapshot,
            entry: PeriodEntry::hole(HoleReason::NoNegativeNodes),
        });
    }

    let entry = match compute_centralities(&graph, &negatives, config)
        .and_then(|record| AggregatedCentrality::from_record(&record))
    {
        Ok(agg) => PeriodEntry::Recorded(agg),
        Err(AnalysisError::EmptyRecord(_)) => PeriodEntry::hole(HoleReason::NoNegativeNodes),
        Err(err @ AnalysisError::DegenerateGraph { .. }) => {
            warn!(period, %err, "degenerate period graph");
            PeriodEntry::hole(HoleReason::DegenerateGraph)
        }
        Err(err @ AnalysisError::Convergence { .. })
            if config.on_convergence_failure == ConvergencePolicy::Skip =>
        {
            warn!(period, %err, "skipping period");
            PeriodEntry::hole(HoleReason::ConvergenceFailed)
        }
        Err(err) => return Err(err),
    };

    Ok(PeriodOutcome { snapshot, entry })
}

/// Run the full temporal pipeline.
///
/// # Errors
///
/// - [`AnalysisError::InvalidPeriodCount`] / [`AnalysisError::EmptyInput`]
///   from segmentation.
/// - The first error, in period order, raised by [`analyze_period`].
#[instrument(skip_all, fields(edges = edges.len(), periods = config.periods.count))]
pub fn run_timeline(edges: &[SignedEdge], config: &AnalysisConfig) -> AnalysisResult<Timeline> {
    let segmenter = PeriodSegmenter::from_edges(edges, config.periods.count)?;
    let partitions = segmenter.partition(edges)?;
    let bounds = segmenter.all_bounds();

    info!(
        periods = segmenter.count(),
        parallel = config.pipeline.parallel,
        "running timeline"
    );

    let run = |(period, period_edges): (PeriodIndex, &Vec<SignedEdge>)| {
        analyze_period(period, bounds[period], period_edges, &config.centrality)
    };
    let outcomes: Vec<AnalysisResult<PeriodOutcome>> = if config.pipeline.parallel {
        partitions.par_iter().enumerate().map(run).collect()
    } else {
        partitions.iter().enumerate().map(run).collect()
    };

    let mut assembler = TimeSeriesAssembler::new(segmenter.count());
    let mut snapshots = Vec::with_capacity(segmenter.count());
    for outcome in outcomes {
        let PeriodOutcome { snapshot, entry } = outcome?;
        assembler.push(snapshot.period, entry)?;
        snapshots.push(snapshot);
    }
    let series = assembler.finish();

    info!(
        recorded = series.recorded_count(),
        holes = series.hole_count(),
        "timeline complete"
    );

    Ok(Timeline {
        start: segmenter.start(),
        end: segmenter.end(),
        snapshots,
        series,
    })
}
