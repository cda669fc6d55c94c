//! `negtrust timeline`: per-period centrality of negative nodes.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use negtrust_core::config::AnalysisConfig;
use negtrust_core::time::to_datetime;
use negtrust_graph::pipeline::{Timeline, run_timeline};
use negtrust_graph::series::PeriodEntry;

use super::{load_edges, report};
use crate::output::{OutputMode, fmt_opt, pretty_kv, pretty_section, render_mode};

/// Arguments for `negtrust timeline`.
#[derive(Args, Debug)]
pub struct TimelineArgs {
    /// Edge file (CSV).
    pub input: PathBuf,

    /// Number of equal-width periods (overrides `[periods] count`).
    #[arg(long, short = 'n')]
    pub periods: Option<usize>,

    /// Analyze periods in parallel (overrides `[pipeline] parallel`).
    #[arg(long)]
    pub parallel: bool,
}

impl TimelineArgs {
    /// Apply flag overrides on top of the resolved configuration.
    pub fn effective_config(&self, base: &AnalysisConfig) -> AnalysisConfig {
        let mut config = base.clone();
        if let Some(count) = self.periods {
            config.periods.count = count;
        }
        if self.parallel {
            config.pipeline.parallel = true;
        }
        config
    }
}

/// Execute `negtrust timeline`.
pub fn run_timeline_cmd(
    args: &TimelineArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let config = args.effective_config(config);
    let edges = load_edges(&args.input, output)?;
    let timeline = run_timeline(&edges, &config).map_err(|e| report(output, e.into()))?;
    render_mode(output, &timeline, render_text, render_pretty)
}

fn entry_columns(entry: &PeriodEntry) -> (String, String, String, String) {
    match entry {
        PeriodEntry::Recorded(agg) => (
            "recorded".to_string(),
            fmt_opt(Some(agg.degree)),
            fmt_opt(Some(agg.betweenness)),
            fmt_opt(Some(agg.eigenvector)),
        ),
        PeriodEntry::Hole { reason } => (
            reason.to_string(),
            fmt_opt(None),
            fmt_opt(None),
            fmt_opt(None),
        ),
    }
}

fn render_text(t: &Timeline, w: &mut dyn Write) -> io::Result<()> {
    for (snapshot, entry) in t.snapshots.iter().zip(t.series.entries()) {
        let (status, degree, betweenness, eigenvector) = entry_columns(entry);
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{status}\t{degree}\t{betweenness}\t{eigenvector}",
            snapshot.period,
            snapshot.bounds.start,
            snapshot.bounds.end,
            snapshot.edge_count,
            snapshot.negative_count,
        )?;
    }
    Ok(())
}

fn date(secs: i64) -> String {
    to_datetime(secs).map_or_else(|_| secs.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

fn render_pretty(t: &Timeline, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Negative-node centrality over time")?;
    pretty_kv(w, "Span", format!("{} .. {}", date(t.start), date(t.end)))?;
    pretty_kv(w, "Periods", t.series.len().to_string())?;
    pretty_kv(w, "Recorded", t.series.recorded_count().to_string())?;
    pretty_kv(w, "Holes", t.series.hole_count().to_string())?;
    writeln!(w)?;

    writeln!(
        w,
        "{:>4}  {:<10}  {:>7}  {:>5}  {:>10}  {:>11}  {:>11}  status",
        "#", "start", "edges", "neg", "degree", "betweenness", "eigenvector"
    )?;
    for (snapshot, entry) in t.snapshots.iter().zip(t.series.entries()) {
        let (status, degree, betweenness, eigenvector) = entry_columns(entry);
        writeln!(
            w,
            "{:>4}  {:<10}  {:>7}  {:>5}  {degree:>10}  {betweenness:>11}  {eigenvector:>11}  {status}",
            snapshot.period,
            date(snapshot.bounds.start),
            snapshot.edge_count,
            snapshot.negative_count,
        )?;
    }
    Ok(())
}
