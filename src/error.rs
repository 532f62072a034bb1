//! Error types for graph reconciliation and clustering.

use std::fmt;

/// Errors that can occur when reconciling or clustering spatial graphs.
#[derive(Debug, Clone)]
pub enum ReconcileError {
    /// An input graph has no vertices. The merged point index requires a
    /// non-empty point set, so empty graphs are rejected up front.
    EmptyGraph {
        /// Position of the offending graph in the input list (0 = low-info).
        graph_index: usize,
    },

    /// A radius parameter was zero, negative, or non-finite.
    InvalidRadius(f64),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::EmptyGraph { graph_index } => {
                write!(f, "input graph {} has no vertices", graph_index)
            }
            ReconcileError::InvalidRadius(r) => {
                write!(f, "radius must be finite and positive, got {}", r)
            }
        }
    }
}

impl std::error::Error for ReconcileError {}
