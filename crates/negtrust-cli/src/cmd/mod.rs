pub mod centrality;
pub mod summary;
pub mod time_stats;
pub mod timeline;

use std::path::Path;

use negtrust_core::AnalysisError;
use negtrust_core::model::SignedEdge;
use tracing::warn;

use crate::ingest;
use crate::output::{CliError, OutputMode, render_error};

const INPUT_HINT: &str =
    "Expected a CSV file with header FROM_NODE,TO_NODE,TRUST_INDEX,TIME_SINCE_EPOCH.";

/// Render `err` to stderr in the active output mode and hand it back for
/// propagation.
///
/// Analysis errors carry their `E####` code and hint; anything else is
/// reported with its context chain.
pub fn report(output: OutputMode, err: anyhow::Error) -> anyhow::Error {
    let cli_error = err
        .downcast_ref::<AnalysisError>()
        .map_or_else(|| CliError::new(format!("{err:#}")), CliError::from);
    if let Err(render_err) = render_error(output, &cli_error) {
        warn!(error = %render_err, "failed to render error");
    }
    err
}

/// Load and sign the edge file, reporting failures.
pub fn load_edges(path: &Path, output: OutputMode) -> anyhow::Result<Vec<SignedEdge>> {
    ingest::read_signed_edges(path).map_err(|err| {
        if err.downcast_ref::<AnalysisError>().is_some() {
            report(output, err)
        } else {
            let cli_error = CliError::with_details(format!("{err:#}"), INPUT_HINT, "input_error");
            if let Err(render_err) = render_error(output, &cli_error) {
                warn!(error = %render_err, "failed to render error");
            }
            err
        }
    })
}
