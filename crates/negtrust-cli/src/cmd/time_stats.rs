//! `negtrust time-stats`: distribution of edge formation times.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use negtrust_core::config::AnalysisConfig;
use negtrust_core::time::{TimeStats, to_datetime};
use serde::Serialize;

use super::{load_edges, report};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `negtrust time-stats`.
#[derive(Args, Debug)]
pub struct TimeStatsArgs {
    /// Edge file (CSV).
    pub input: PathBuf,

    /// Histogram bin count (overrides `[time] histogram_bins`).
    #[arg(long)]
    pub bins: Option<usize>,
}

/// Report payload for `negtrust time-stats`.
#[derive(Debug, Serialize)]
pub struct TimeStatsReport {
    pub first_edge: DateTime<Utc>,
    pub last_edge: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: TimeStats,
}

/// Execute `negtrust time-stats`.
pub fn run_time_stats(
    args: &TimeStatsArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let bins = args.bins.unwrap_or(config.time.histogram_bins);
    let edges = load_edges(&args.input, output)?;
    let timestamps: Vec<i64> = edges.iter().map(|e| e.timestamp).collect();

    let build = || -> negtrust_core::AnalysisResult<TimeStatsReport> {
        let stats = TimeStats::compute(&timestamps, bins)?;
        Ok(TimeStatsReport {
            first_edge: to_datetime(stats.min)?,
            last_edge: to_datetime(stats.max)?,
            stats,
        })
    };
    let payload = build().map_err(|e| report(output, e.into()))?;
    render_mode(output, &payload, render_text, render_pretty)
}

fn render_text(r: &TimeStatsReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    writeln!(w, "count\t{}", s.count)?;
    writeln!(w, "min\t{}", s.min)?;
    writeln!(w, "max\t{}", s.max)?;
    writeln!(w, "mean\t{:.3}", s.mean)?;
    writeln!(w, "median\t{:.3}", s.median)?;
    writeln!(w, "std\t{}", s.std.map(|v| format!("{v:.3}")))?;
    for bucket in &s.histogram {
        writeln!(w, "bin\t{:.0}\t{:.0}\t{}", bucket.start, bucket.end, bucket.count)?;
    }
    Ok(())
}

fn render_pretty(r: &TimeStatsReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    pretty_section(w, "Edge formation times")?;
    pretty_kv(w, "Edges", s.count.to_string())?;
    pretty_kv(w, "First edge", r.first_edge.to_rfc3339())?;
    pretty_kv(w, "Last edge", r.last_edge.to_rfc3339())?;
    pretty_kv(w, "Mean (epoch s)", format!("{:.3}", s.mean))?;
    pretty_kv(w, "Median (epoch s)", format!("{:.3}", s.median))?;
    pretty_kv(w, "Std dev (s)", s.std.map(|v| format!("{v:.3}")).to_string())?;
    pretty_kv(w, "Bins", s.histogram.len().to_string())?;

    let busiest = s.histogram.iter().max_by_key(|b| b.count);
    if let Some(b) = busiest {
        pretty_kv(
            w,
            "Busiest bin",
            format!("{:.0} .. {:.0} ({} edges)", b.start, b.end, b.count),
        )?;
    }
    Ok(())
}
