#![forbid(unsafe_code)]

mod cmd;
mod ingest;
mod output;

use clap::{Parser, Subcommand};
use negtrust_core::config::resolve_config;
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "negtrust: temporal centrality of negatively rated actors in trust networks",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./negtrust.toml, then the user config).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Whole-network statistics: density, clustering, paths, degree distribution.
    Summary(cmd::summary::SummaryArgs),

    /// Centrality of negatively rated nodes over the whole dataset.
    Centrality(cmd::centrality::CentralityArgs),

    /// Per-period mean centrality of negatively rated nodes.
    Timeline(cmd::timeline::TimelineArgs),

    /// Distribution of edge formation times.
    TimeStats(cmd::time_stats::TimeStatsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("NEGTRUST_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "negtrust=debug,info"
        } else {
            "negtrust=info,warn"
        })
    });

    let format = env::var("NEGTRUST_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    let working_dir = env::current_dir()?;
    let config = resolve_config(cli.config.as_deref(), &working_dir)
        .map_err(|e| cmd::report(output, e))?;
    debug!(?config, "configuration resolved");

    let result = match &cli.command {
        Commands::Summary(args) => cmd::summary::run_summary(args, output, &config),
        Commands::Centrality(args) => cmd::centrality::run_centrality(args, output, &config),
        Commands::Timeline(args) => cmd::timeline::run_timeline_cmd(args, output, &config),
        Commands::TimeStats(args) => cmd::time_stats::run_time_stats(args, output, &config),
    };

    if result.is_ok() {
        info!("done");
    }
    result
}
