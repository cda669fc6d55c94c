//! `negtrust centrality`: centrality of negatively rated actors over the
//! whole dataset.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use negtrust_core::config::AnalysisConfig;
use negtrust_core::model::NodeId;
use negtrust_graph::graph::{TrustGraph, extract_subgraph, select_negative_nodes};
use negtrust_graph::metrics::{AggregatedCentrality, compute_centralities};
use serde::Serialize;
use tracing::info;

use super::{load_edges, report};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `negtrust centrality`.
#[derive(Args, Debug)]
pub struct CentralityArgs {
    /// Edge file (CSV).
    pub input: PathBuf,

    /// Score nodes inside the negative-node subgraph instead of the full graph.
    #[arg(long)]
    pub subgraph: bool,

    /// Show only the N nodes with the highest degree centrality.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Centrality scores of one negatively rated node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeScores {
    pub node: NodeId,
    pub degree: f64,
    pub betweenness: f64,
    pub eigenvector: f64,
}

/// Report payload for `negtrust centrality`.
#[derive(Debug, Serialize)]
pub struct CentralityReport {
    pub input: String,
    pub subgraph: bool,
    pub node_count: usize,
    pub arc_count: usize,
    pub negative_count: usize,
    /// `None` when no node received a negative rating.
    pub mean: Option<AggregatedCentrality>,
    pub nodes: Vec<NodeScores>,
}

/// Execute `negtrust centrality`.
pub fn run_centrality(
    args: &CentralityArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let payload = build_report(&args.input, args.subgraph, args.top, config, output)?;
    render_mode(output, &payload, render_text, render_pretty)
}

fn build_report(
    input: &Path,
    use_subgraph: bool,
    top: Option<usize>,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<CentralityReport> {
    let edges = load_edges(input, output)?;
    let full = TrustGraph::from_edges_non_empty(&edges).map_err(|e| report(output, e.into()))?;
    let negatives = select_negative_nodes(&edges);
    let graph = if use_subgraph {
        extract_subgraph(&full, &negatives)
    } else {
        full
    };

    info!(
        nodes = graph.node_count(),
        negatives = negatives.len(),
        subgraph = use_subgraph,
        "scoring negative nodes"
    );

    let (mean, mut nodes) = if negatives.is_empty() {
        (None, Vec::new())
    } else {
        let record = compute_centralities(&graph, &negatives, &config.centrality)
            .map_err(|e| report(output, e.into()))?;
        let mean =
            AggregatedCentrality::from_record(&record).map_err(|e| report(output, e.into()))?;
        let nodes = record
            .degree
            .iter()
            .map(|(&node, &degree)| NodeScores {
                node,
                degree,
                betweenness: record.betweenness.get(&node).copied().unwrap_or_default(),
                eigenvector: record.eigenvector.get(&node).copied().unwrap_or_default(),
            })
            .collect();
        (Some(mean), nodes)
    };

    if let Some(n) = top {
        nodes.sort_by(|a, b| b.degree.total_cmp(&a.degree).then(a.node.cmp(&b.node)));
        nodes.truncate(n);
    }

    Ok(CentralityReport {
        input: input.display().to_string(),
        subgraph: use_subgraph,
        node_count: graph.node_count(),
        arc_count: graph.edge_count(),
        negative_count: negatives.len(),
        mean,
        nodes,
    })
}

fn render_text(r: &CentralityReport, w: &mut dyn Write) -> io::Result<()> {
    if let Some(mean) = r.mean {
        writeln!(
            w,
            "mean\t{:.6}\t{:.6}\t{:.6}",
            mean.degree, mean.betweenness, mean.eigenvector
        )?;
    }
    for n in &r.nodes {
        writeln!(
            w,
            "{}\t{:.6}\t{:.6}\t{:.6}",
            n.node, n.degree, n.betweenness, n.eigenvector
        )?;
    }
    Ok(())
}

fn render_pretty(r: &CentralityReport, w: &mut dyn Write) -> io::Result<()> {
    let scope = if r.subgraph { "negative subgraph" } else { "full graph" };
    pretty_section(w, &format!("Negative-node centrality ({scope})"))?;
    pretty_kv(w, "Nodes", r.node_count.to_string())?;
    pretty_kv(w, "Arcs", r.arc_count.to_string())?;
    pretty_kv(w, "Negative nodes", r.negative_count.to_string())?;

    let Some(mean) = r.mean else {
        writeln!(w)?;
        writeln!(w, "No node received a negative rating.")?;
        return Ok(());
    };
    pretty_kv(w, "Mean degree", format!("{:.6}", mean.degree))?;
    pretty_kv(w, "Mean betweenness", format!("{:.6}", mean.betweenness))?;
    pretty_kv(w, "Mean eigenvector", format!("{:.6}", mean.eigenvector))?;

    writeln!(w)?;
    writeln!(
        w,
        "{:>12}  {:>12}  {:>12}  {:>12}",
        "node", "degree", "betweenness", "eigenvector"
    )?;
    for n in &r.nodes {
        writeln!(
            w,
            "{:>12}  {:>12.6}  {:>12.6}  {:>12.6}",
            n.node.to_string(),
            n.degree,
            n.betweenness,
            n.eigenvector
        )?;
    }
    Ok(())
}
