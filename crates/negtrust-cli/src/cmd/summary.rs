//! `negtrust summary`: whole-network descriptive statistics.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use negtrust_core::config::AnalysisConfig;
use negtrust_graph::graph::TrustGraph;
use negtrust_graph::summary::NetworkSummary;
use serde::Serialize;

use super::{load_edges, report};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `negtrust summary`.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Edge file (CSV).
    pub input: PathBuf,

    /// Analyze the undirected projection instead of the directed graph.
    ///
    /// Enables modularity, community count, and connected components.
    #[arg(long)]
    pub undirected: bool,
}

/// Report payload for `negtrust summary`.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub input: String,
    pub content_hash: String,
    #[serde(flatten)]
    pub summary: NetworkSummary,
}

/// Execute `negtrust summary`.
pub fn run_summary(
    args: &SummaryArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let report_payload = build_report(&args.input, args.undirected, config, output)?;
    render_mode(output, &report_payload, render_text, render_pretty)
}

fn build_report(
    input: &Path,
    undirected: bool,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<SummaryReport> {
    let edges = load_edges(input, output)?;
    let graph = TrustGraph::from_edges_non_empty(&edges).map_err(|e| report(output, e.into()))?;

    let summary = if undirected {
        NetworkSummary::analyze(&graph.undirected(), &config.summary)
    } else {
        NetworkSummary::analyze(&graph.graph, &config.summary)
    }
    .map_err(|e| report(output, e.into()))?;

    Ok(SummaryReport {
        input: input.display().to_string(),
        content_hash: graph.content_hash,
        summary,
    })
}

fn render_text(r: &SummaryReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.summary;
    writeln!(w, "directed\t{}", s.directed)?;
    writeln!(w, "nodes\t{}", s.node_count)?;
    writeln!(w, "edges\t{}", s.edge_count)?;
    writeln!(w, "density\t{:.6}", s.density)?;
    writeln!(w, "average_clustering\t{}", s.average_clustering)?;
    writeln!(w, "modularity\t{}", s.modularity)?;
    writeln!(w, "communities\t{}", s.community_count)?;
    writeln!(w, "connected_components\t{}", s.connected_components)?;
    writeln!(w, "diameter\t{}", s.diameter)?;
    writeln!(w, "average_shortest_path\t{}", s.average_shortest_path)?;
    for bucket in &s.degree_histogram {
        writeln!(w, "degree\t{}\t{}\t{}", bucket.start, bucket.end, bucket.count)?;
    }
    Ok(())
}

fn render_pretty(r: &SummaryReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.summary;
    let kind = if s.directed { "directed" } else { "undirected" };
    pretty_section(w, &format!("Network summary ({kind})"))?;
    pretty_kv(w, "Input", &r.input)?;
    pretty_kv(w, "Content hash", &r.content_hash)?;
    pretty_kv(w, "Nodes", s.node_count.to_string())?;
    pretty_kv(w, "Edges", s.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.6}", s.density))?;
    pretty_kv(w, "Avg clustering", s.average_clustering.map(|v| format!("{v:.6}")).to_string())?;
    pretty_kv(w, "Modularity", s.modularity.map(|v| format!("{v:.6}")).to_string())?;
    pretty_kv(w, "Communities", s.community_count.to_string())?;
    pretty_kv(w, "Components", s.connected_components.to_string())?;
    pretty_kv(w, "Diameter", s.diameter.to_string())?;
    pretty_kv(
        w,
        "Avg shortest path",
        s.average_shortest_path.map(|v| format!("{v:.6}")).to_string(),
    )?;

    writeln!(w)?;
    pretty_section(w, "Degree distribution")?;
    let widest = s.degree_histogram.iter().map(|b| b.count).max().unwrap_or(0);
    for bucket in &s.degree_histogram {
        let bar = bar_len(bucket.count, widest);
        writeln!(
            w,
            "{:>5}-{:<5} {:>8} {}",
            bucket.start,
            bucket.end,
            bucket.count,
            "#".repeat(bar)
        )?;
    }
    Ok(())
}

/// Scale `count` onto a 40-column bar.
const fn bar_len(count: usize, widest: usize) -> usize {
    if widest == 0 { 0 } else { count * 40 / widest }
}
