//! Graph construction and lookup errors.

use crate::domain::NodeId;

/// Errors raised while building or querying a route graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Edge weight is negative or not finite
    #[error("invalid weight {weight} on edge {from} -> {to}: must be finite and nonnegative")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    /// Edge is present but carries no weight
    #[error("missing weight on edge {from} -> {to}")]
    MissingWeight { from: NodeId, to: NodeId },

    /// Node has no coordinate in the position map
    #[error("node {0} has no known position")]
    NotFound(NodeId),
}
