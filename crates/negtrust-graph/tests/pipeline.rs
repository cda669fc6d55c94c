//! End-to-end timeline scenarios.

use negtrust_core::config::{AnalysisConfig, ConvergencePolicy};
use negtrust_core::error::AnalysisError;
use negtrust_core::model::{Sign, SignedEdge};
use negtrust_graph::metrics::Measure;
use negtrust_graph::pipeline::run_timeline;
use negtrust_graph::series::HoleReason;

fn config(periods: usize) -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.periods.count = periods;
    config
}

/// Four periods over [0, 100]:
///
/// Period 0: 1 ↔ 2 with 2 rated negatively by 3.
/// Period 1: nothing.
/// Period 2: positive ratings only.
/// Period 3: 4-cycle with two negative ratings.
fn mixed_history() -> Vec<SignedEdge> {
    vec![
        SignedEdge::new(1_u64, 2_u64, Sign::Positive, 0),
        SignedEdge::new(2_u64, 1_u64, Sign::Positive, 5),
        SignedEdge::new(3_u64, 2_u64, Sign::Negative, 10),
        SignedEdge::new(5_u64, 6_u64, Sign::Positive, 55),
        SignedEdge::new(6_u64, 5_u64, Sign::Positive, 58),
        SignedEdge::new(1_u64, 2_u64, Sign::Positive, 80),
        SignedEdge::new(2_u64, 3_u64, Sign::Negative, 85),
        SignedEdge::new(3_u64, 4_u64, Sign::Positive, 90),
        SignedEdge::new(4_u64, 1_u64, Sign::Negative, 100),
    ]
}

#[test]
fn timeline_records_and_holes() {
    let timeline = run_timeline(&mixed_history(), &config(4)).expect("timeline");

    assert_eq!(timeline.start, 0);
    assert_eq!(timeline.end, 100);
    assert_eq!(timeline.series.len(), 4);
    assert_eq!(timeline.snapshots.len(), 4);

    let entries = timeline.series.entries();
    assert!(!entries[0].is_hole());
    assert_eq!(entries[1].hole_reason(), Some(HoleReason::EmptyPeriod));
    assert_eq!(entries[2].hole_reason(), Some(HoleReason::NoNegativeNodes));
    assert!(!entries[3].is_hole());

    let degree = timeline.series.measure_series(Measure::Degree);
    assert_eq!(degree[1], (1, None));
    let last = degree[3].1.expect("period 3 recorded");
    assert!((last - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn snapshots_describe_each_period() {
    let timeline = run_timeline(&mixed_history(), &config(4)).expect("timeline");
    let first = &timeline.snapshots[0];
    assert_eq!(first.edge_count, 3);
    assert_eq!(first.node_count, 3);
    assert_eq!(first.arc_count, 3);
    assert_eq!(first.negative_count, 1);
    assert_eq!(first.subgraph_node_count, 3);
    assert_eq!(first.subgraph_arc_count, 3, "every arc touches node 2");
    assert!(first.content_hash.is_some());

    let quiet = &timeline.snapshots[1];
    assert_eq!(quiet.edge_count, 0);
    assert_eq!(quiet.content_hash, None);
    assert_eq!(quiet.bounds.index, 1);
}

#[test]
fn parallel_matches_sequential() {
    let edges = mixed_history();
    let sequential = run_timeline(&edges, &config(4)).expect("sequential");

    let mut parallel_config = config(4);
    parallel_config.pipeline.parallel = true;
    let parallel = run_timeline(&edges, &parallel_config).expect("parallel");

    assert_eq!(sequential, parallel);
}

#[test]
fn single_period_covers_everything() {
    let timeline = run_timeline(&mixed_history(), &config(1)).expect("timeline");
    assert_eq!(timeline.series.len(), 1);
    assert_eq!(timeline.snapshots[0].edge_count, 9);
}

#[test]
fn zero_periods_is_rejected() {
    let err = run_timeline(&mixed_history(), &config(0)).expect_err("invalid");
    assert_eq!(err, AnalysisError::InvalidPeriodCount(0));
}

#[test]
fn empty_input_is_rejected() {
    let err = run_timeline(&[], &config(4)).expect_err("empty");
    assert!(matches!(err, AnalysisError::EmptyInput(_)));
}

#[test]
fn convergence_failure_aborts_or_skips() {
    let edges = mixed_history();
    let mut cfg = config(4);
    cfg.centrality.max_iter = 1;

    let err = run_timeline(&edges, &cfg).expect_err("abort by default");
    assert!(matches!(err, AnalysisError::Convergence { .. }));

    cfg.centrality.on_convergence_failure = ConvergencePolicy::Skip;
    let timeline = run_timeline(&edges, &cfg).expect("skip");
    let reasons: Vec<_> = timeline
        .series
        .entries()
        .iter()
        .map(|e| e.hole_reason())
        .collect();
    assert_eq!(
        reasons,
        vec![
            Some(HoleReason::ConvergenceFailed),
            Some(HoleReason::EmptyPeriod),
            Some(HoleReason::NoNegativeNodes),
            Some(HoleReason::ConvergenceFailed),
        ]
    );
}
