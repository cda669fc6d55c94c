//! Analysis configuration.
//!
//! [`AnalysisConfig`] is read from TOML; every key has a default, so a
//! partial file (or none at all) is valid. [`resolve_config`] picks the
//! first source that exists: an explicit path, `negtrust.toml` in the
//! working directory, the user config file, then built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "negtrust.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub periods: PeriodConfig,
    #[serde(default)]
    pub centrality: CentralityConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    #[serde(default = "default_period_count")]
    pub count: usize,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            count: default_period_count(),
        }
    }
}

/// What the pipeline does when eigenvector centrality fails to converge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergencePolicy {
    /// Propagate the error and stop the run.
    #[default]
    Abort,
    /// Record the period as a hole and continue.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityConfig {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub on_convergence_failure: ConvergencePolicy,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
            on_convergence_failure: ConvergencePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_bucket_width")]
    pub histogram_bucket_width: usize,
    /// Upper edge of the last degree bucket; larger degrees are clamped into it.
    #[serde(default = "default_histogram_max")]
    pub histogram_max_degree: usize,
    #[serde(default = "default_seed")]
    pub label_propagation_seed: u64,
    #[serde(default = "default_max_rounds")]
    pub label_propagation_max_rounds: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            histogram_bucket_width: default_bucket_width(),
            histogram_max_degree: default_histogram_max(),
            label_propagation_seed: default_seed(),
            label_propagation_max_rounds: default_max_rounds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
    #[serde(default = "default_time_bins")]
    pub histogram_bins: usize,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            histogram_bins: default_time_bins(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Process periods on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

/// Parse an [`AnalysisConfig`] from a TOML file.
pub fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// User-level config path (`<config dir>/negtrust/config.toml`), if the
/// platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("negtrust/config.toml"))
}

/// Resolve the effective configuration.
///
/// Precedence (first hit wins):
/// 1. `explicit` path (must exist)
/// 2. `negtrust.toml` in `working_dir`
/// 3. user config file
/// 4. built-in defaults
pub fn resolve_config(explicit: Option<&Path>, working_dir: &Path) -> Result<AnalysisConfig> {
    resolve_config_from(explicit, working_dir, user_config_path().as_deref())
}

fn resolve_config_from(
    explicit: Option<&Path>,
    working_dir: &Path,
    user_path: Option<&Path>,
) -> Result<AnalysisConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading explicit config");
        return load_config_file(path);
    }

    let project = working_dir.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        debug!(path = %project.display(), "loading project config");
        return load_config_file(&project);
    }

    if let Some(user) = user_path.filter(|p| p.exists()) {
        debug!(path = %user.display(), "loading user config");
        return load_config_file(user);
    }

    Ok(AnalysisConfig::default())
}

const fn default_period_count() -> usize {
    12
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1.0e-6
}

const fn default_bucket_width() -> usize {
    10
}

const fn default_histogram_max() -> usize {
    100
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_rounds() -> usize {
    100
}

const fn default_time_bins() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cfg = resolve_config_from(None, dir.path(), None).expect("resolve");
        assert_eq!(cfg, AnalysisConfig::default());
        assert_eq!(cfg.periods.count, 12);
        assert_eq!(cfg.centrality.max_iter, 100);
        assert!((cfg.centrality.tolerance - 1e-6).abs() < f64::EPSILON);
        assert_eq!(cfg.centrality.on_convergence_failure, ConvergencePolicy::Abort);
        assert_eq!(cfg.summary.histogram_bucket_width, 10);
        assert_eq!(cfg.summary.histogram_max_degree, 100);
        assert_eq!(cfg.time.histogram_bins, 100);
        assert!(!cfg.pipeline.parallel);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: AnalysisConfig = toml::from_str(
            r#"
[periods]
count = 24

[centrality]
on_convergence_failure = "skip"
"#,
        )
        .expect("parse");
        assert_eq!(cfg.periods.count, 24);
        assert_eq!(cfg.centrality.on_convergence_failure, ConvergencePolicy::Skip);
        assert_eq!(cfg.centrality.max_iter, 100);
        assert_eq!(cfg.summary, SummaryConfig::default());
    }

    #[test]
    fn project_file_beats_user_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[periods]\ncount = 3\n")
            .expect("write project");
        let user = dir.path().join("user.toml");
        std::fs::write(&user, "[periods]\ncount = 9\n").expect("write user");

        let cfg = resolve_config_from(None, dir.path(), Some(&user)).expect("resolve");
        assert_eq!(cfg.periods.count, 3);
    }

    #[test]
    fn user_file_used_when_no_project_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let user = dir.path().join("user.toml");
        std::fs::write(&user, "[pipeline]\nparallel = true\n").expect("write user");

        let cfg = resolve_config_from(None, dir.path(), Some(&user)).expect("resolve");
        assert!(cfg.pipeline.parallel);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        let err = resolve_config_from(Some(&missing), dir.path(), None).expect_err("must fail");
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[periods\ncount = ").expect("write");
        let err = load_config_file(&bad).expect_err("must fail");
        assert!(err.to_string().contains("Failed to parse"));
    }
}
