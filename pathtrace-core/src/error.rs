//! Error types for pathtrace-core.
//!
//! Validation failures are reported before an engine records its first step,
//! so a caller either receives a complete [`StepTrace`](crate::StepTrace) or
//! one of these errors, never a partial trace. A negative cycle is not an
//! error: it is a terminal outcome stored in the trace itself.

use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

/// Result type alias for pathtrace-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building graphs, running engines, or
/// navigating a recorded trace.
#[derive(Error, Debug)]
pub enum Error {
    /// Dijkstra was given an edge with a negative weight.
    #[error("Invalid weight {weight} on edge {edge}: Dijkstra requires non-negative weights")]
    InvalidWeight {
        /// Offending edge.
        edge: EdgeId,
        /// The negative weight found on it.
        weight: f64,
    },

    /// An edge weight is NaN or infinite.
    #[error("Non-finite weight {weight} on edge {edge}")]
    NonFiniteWeight {
        /// Offending edge.
        edge: EdgeId,
        /// The weight found on it.
        weight: f64,
    },

    /// Edge weights are large enough that a recorded distance could
    /// overflow `f64`.
    #[error("Edge weights too large: recorded distances could overflow f64")]
    WeightOverflow {
        /// Bound on any distance the run could record.
        bound: f64,
    },

    /// A node id was referenced that the graph does not contain.
    #[error("Unknown node {node} referenced by {referenced_by}")]
    UnknownNode {
        /// The missing node id.
        node: NodeId,
        /// What referenced it, e.g. "source" or "edge 3".
        referenced_by: String,
    },

    /// Two nodes share the same id.
    #[error("Duplicate node id: {node}")]
    DuplicateNode {
        /// The duplicated id.
        node: NodeId,
    },

    /// Two edges share the same id.
    #[error("Duplicate edge id: {edge}")]
    DuplicateEdge {
        /// The duplicated id.
        edge: EdgeId,
    },

    /// Playback was asked to seek outside the trace.
    #[error("Step index {index} out of range for trace of length {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of steps in the trace.
        len: usize,
    },

    /// A caller-supplied abort check stopped the run.
    #[error("Run cancelled after {steps_recorded} steps")]
    Cancelled {
        /// Steps recorded before cancellation; they are discarded.
        steps_recorded: usize,
    },

    /// A deserialized trace violates the trace invariants.
    #[error("Invalid trace: {reason}")]
    InvalidTrace {
        /// Which invariant failed.
        reason: String,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an unknown node error for the given referrer.
    pub fn unknown_node(node: NodeId, referenced_by: impl Into<String>) -> Self {
        Self::UnknownNode {
            node,
            referenced_by: referenced_by.into(),
        }
    }

    /// Creates an invalid trace error.
    pub fn invalid_trace(reason: impl Into<String>) -> Self {
        Self::InvalidTrace {
            reason: reason.into(),
        }
    }

    /// True for errors raised by input validation before a run starts.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidWeight { .. }
                | Self::NonFiniteWeight { .. }
                | Self::WeightOverflow { .. }
                | Self::UnknownNode { .. }
                | Self::DuplicateNode { .. }
                | Self::DuplicateEdge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidWeight {
            edge: 7,
            weight: -2.5,
        };
        assert!(err.to_string().contains("edge 7"));
        assert!(err.to_string().contains("-2.5"));

        let err = Error::OutOfRange { index: 12, len: 4 };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains('4'));

        let err = Error::unknown_node(9, "source");
        assert_eq!(err.to_string(), "Unknown node 9 referenced by source");
    }

    #[test]
    fn test_validation_classification() {
        assert!(Error::DuplicateNode { node: 1 }.is_validation());
        assert!(Error::unknown_node(1, "edge 0").is_validation());
        assert!(Error::WeightOverflow { bound: f64::INFINITY }.is_validation());
        assert!(!Error::OutOfRange { index: 0, len: 0 }.is_validation());
        assert!(!Error::Cancelled { steps_recorded: 3 }.is_validation());
    }
}
