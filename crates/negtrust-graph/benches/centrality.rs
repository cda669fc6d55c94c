use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use negtrust_core::config::{AnalysisConfig, CentralityConfig, SummaryConfig};
use negtrust_core::model::{Sign, SignedEdge};
use negtrust_graph::graph::{TrustGraph, select_negative_nodes};
use negtrust_graph::metrics::compute_centralities;
use negtrust_graph::pipeline::run_timeline;
use negtrust_graph::summary::NetworkSummary;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct Tier {
    name: &'static str,
    nodes: u64,
    edges: usize,
}

const TIERS: [Tier; 3] = [
    Tier { name: "small", nodes: 100, edges: 400 },
    Tier { name: "medium", nodes: 500, edges: 3_000 },
    Tier { name: "large", nodes: 2_000, edges: 12_000 },
];

/// Random signed edges, roughly one in ten negative, spread over a year.
fn synthetic_edges(tier: &Tier, seed: u64) -> Vec<SignedEdge> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..tier.edges)
        .map(|_| {
            let from = rng.gen_range(0..tier.nodes);
            let to = rng.gen_range(0..tier.nodes);
            let sign = if rng.gen_bool(0.1) {
                Sign::Negative
            } else {
                Sign::Positive
            };
            SignedEdge::new(from, to, sign, rng.gen_range(0..31_536_000))
        })
        .collect()
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("centrality");
    group.sample_size(20);

    for (i, tier) in TIERS.iter().enumerate() {
        let edges = synthetic_edges(tier, 0x5EED_u64 + i as u64);
        let graph = TrustGraph::from_edges(&edges);
        let negatives = select_negative_nodes(&edges);
        let config = CentralityConfig::default();
        group.throughput(Throughput::Elements(edges.len() as u64));

        group.bench_with_input(BenchmarkId::new("build", tier.name), &edges, |b, edges| {
            b.iter(|| black_box(TrustGraph::from_edges(edges)));
        });

        group.bench_with_input(
            BenchmarkId::new("compute", tier.name),
            &graph,
            |b, graph| b.iter(|| black_box(compute_centralities(graph, &negatives, &config))),
        );

        group.bench_with_input(
            BenchmarkId::new("summary", tier.name),
            &graph,
            |b, graph| b.iter(|| black_box(NetworkSummary::analyze(&graph.graph, &SummaryConfig::default()))),
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let tier = &TIERS[1];
    let edges = synthetic_edges(tier, 0x7133);
    for parallel in [false, true] {
        let mut config = AnalysisConfig::default();
        config.pipeline.parallel = parallel;
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_with_input(BenchmarkId::new(label, tier.name), &edges, |b, edges| {
            b.iter(|| black_box(run_timeline(edges, &config)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_centrality, bench_pipeline);
criterion_main!(benches);
