//! CSV edge-file ingestion.
//!
//! The only file the binary reads besides configuration. Expected header:
//! `FROM_NODE,TO_NODE,TRUST_INDEX,TIME_SINCE_EPOCH`.

use std::path::Path;

use anyhow::Context;
use negtrust_core::model::edge::sign_edges;
use negtrust_core::model::{RawEdge, SignedEdge};
use tracing::{debug, instrument};

/// Read every row of `path` as a [`RawEdge`].
///
/// Row numbers in errors are 1-based and count the header line.
#[instrument]
pub fn read_raw_edges(path: &Path) -> anyhow::Result<Vec<RawEdge>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open edge file {}", path.display()))?;

    let mut edges = Vec::new();
    for (i, row) in reader.deserialize::<RawEdge>().enumerate() {
        let edge =
            row.with_context(|| format!("Malformed row {} in {}", i + 2, path.display()))?;
        edges.push(edge);
    }

    debug!(rows = edges.len(), "edge file loaded");
    Ok(edges)
}

/// Read `path` and reduce trust magnitudes to signs.
///
/// Sign failures surface as [`negtrust_core::AnalysisError`] inside the
/// returned `anyhow::Error` so callers can recover the error code.
pub fn read_signed_edges(path: &Path) -> anyhow::Result<Vec<SignedEdge>> {
    let raw = read_raw_edges(path)?;
    Ok(sign_edges(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use negtrust_core::model::{NodeId, Sign};
    use std::io::Write;

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(body.as_bytes()).expect("write");
        file
    }

    #[test]
    fn reads_dataset_columns() {
        let file = write_csv(
            "FROM_NODE,TO_NODE,TRUST_INDEX,TIME_SINCE_EPOCH\n\
             6,2,4,1289241911\n\
             6, 5, -2 ,1289241941\n",
        );
        let raw = read_raw_edges(file.path()).expect("read");
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].to_node, NodeId(5));
        assert!((raw[1].trust + 2.0).abs() < f64::EPSILON);

        let signed = read_signed_edges(file.path()).expect("sign");
        assert_eq!(signed[0].sign, Sign::Positive);
        assert_eq!(signed[1].sign, Sign::Negative);
        assert_eq!(signed[1].timestamp, 1_289_241_941);
    }

    #[test]
    fn header_only_file_is_empty() {
        let file = write_csv("FROM_NODE,TO_NODE,TRUST_INDEX,TIME_SINCE_EPOCH\n");
        assert!(read_signed_edges(file.path()).expect("read").is_empty());
    }

    #[test]
    fn malformed_row_names_line() {
        let file = write_csv(
            "FROM_NODE,TO_NODE,TRUST_INDEX,TIME_SINCE_EPOCH\n1,2,1,10\nx,2,1,10\n",
        );
        let err = read_raw_edges(file.path()).expect_err("must fail");
        assert!(err.to_string().contains("Malformed row 3"), "{err}");
    }

    #[test]
    fn nan_magnitude_keeps_analysis_error() {
        let file = write_csv("FROM_NODE,TO_NODE,TRUST_INDEX,TIME_SINCE_EPOCH\n1,2,NaN,10\n");
        let err = read_signed_edges(file.path()).expect_err("nan has no sign");
        assert!(err.downcast_ref::<negtrust_core::AnalysisError>().is_some());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_raw_edges(&dir.path().join("absent.csv")).expect_err("missing");
        assert!(err.to_string().contains("Failed to open edge file"));
    }
}
