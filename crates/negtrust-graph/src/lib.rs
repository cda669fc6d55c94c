#![forbid(unsafe_code)]
//! negtrust-graph library.
//!
//! Graph analytics over signed trust edges: per-period graph construction,
//! negative-node selection, centrality of negative nodes, whole-graph
//! summaries, and the temporal pipeline that ties them into a time series.
//!
//! # Conventions
//!
//! - **Errors**: fallible operations return
//!   [`negtrust_core::error::AnalysisResult`]. Structurally undefined
//!   measures are [`negtrust_core::Metric::NotApplicable`], not errors.
//! - **Logging**: `tracing` spans on every top-level operation; `debug!`
//!   for intermediate shapes, `warn!` when a period is turned into a hole.

pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod series;
pub mod summary;

pub use graph::{NegativeNodeSet, TrustGraph, extract_subgraph, select_negative_nodes};
pub use metrics::{AggregatedCentrality, CentralityRecord, Measure, compute_centralities};
pub use pipeline::{PeriodOutcome, PeriodSnapshot, Timeline, analyze_period, run_timeline};
pub use series::{HoleReason, PeriodEntry, TimeSeries, TimeSeriesAssembler};
pub use summary::NetworkSummary;
