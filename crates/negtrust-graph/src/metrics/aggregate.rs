//! Per-period reduction of centrality records to means.

use std::collections::BTreeMap;

use negtrust_core::error::{AnalysisError, AnalysisResult};
use negtrust_core::model::NodeId;
use serde::Serialize;

use super::{CentralityRecord, Measure};

/// Arithmetic mean of each centrality measure over the negative nodes of
/// one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatedCentrality {
    pub degree: f64,
    pub betweenness: f64,
    pub eigenvector: f64,
}

impl AggregatedCentrality {
    /// Average every measure of `record`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptyRecord`] naming the first measure whose
    /// map is empty.
    pub fn from_record(record: &CentralityRecord) -> AnalysisResult<Self> {
        Ok(Self {
            degree: mean(&record.degree, Measure::Degree)?,
            betweenness: mean(&record.betweenness, Measure::Betweenness)?,
            eigenvector: mean(&record.eigenvector, Measure::Eigenvector)?,
        })
    }

    #[must_use]
    pub const fn get(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Degree => self.degree,
            Measure::Betweenness => self.betweenness,
            Measure::Eigenvector => self.eigenvector,
        }
    }
}

fn mean(values: &BTreeMap<NodeId, f64>, measure: Measure) -> AnalysisResult<f64> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyRecord(measure.name()));
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    Ok(values.values().sum::<f64>() / n)
}
