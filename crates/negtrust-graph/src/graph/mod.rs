//! Trust graph construction and negative-node views.
//!
//! ```text
//! &[SignedEdge]
//!     ├─ build::TrustGraph::from_edges()       (one arc per ordered pair)
//!     └─ negative::select_negative_nodes()     (targets of negative edges)
//!             ↓
//!        negative::extract_subgraph()          (arcs touching the set)
//! ```

pub mod build;
pub mod negative;

pub use build::TrustGraph;
pub use negative::{NegativeNodeSet, extract_subgraph, select_negative_nodes};
