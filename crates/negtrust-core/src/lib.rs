#![forbid(unsafe_code)]
//! negtrust-core library.
//!
//! Data model, error taxonomy, configuration, and the temporal layer
//! (sign conversion, epoch normalization, period segmentation, time
//! statistics) shared by the graph analytics and the CLI.
//!
//! # Conventions
//!
//! - **Errors**: library operations return [`error::AnalysisResult`];
//!   configuration loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod time;

pub use error::{AnalysisError, AnalysisResult, ErrorCode};
pub use model::{Metric, NodeId, NotApplicableReason, RawEdge, Sign, SignedEdge};
