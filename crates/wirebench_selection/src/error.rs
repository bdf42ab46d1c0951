// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for selection and clipboard operations.

use wirebench_graph::{CommandError, GraphElement};

/// Error raised by selection and clipboard operations
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// Element not present in the graph model
    #[error("Element not in graph: {0:?}")]
    InvalidElement(GraphElement),

    /// Internal topology invariant broken; the pending operation was
    /// discarded without side effects
    #[error("Inconsistent topology: {0}")]
    InconsistentTopology(String),

    /// The produced command unit failed to apply
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Result type for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;
