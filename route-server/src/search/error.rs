//! Search error types.

use crate::domain::NodeId;
use crate::graph::GraphError;

/// Precondition failures of a search call.
///
/// An unreachable goal is not an error: it is reported as a result with
/// `found == false`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Start, goal, or a visited node has no coordinate
    #[error("node {0} not found in position map")]
    NotFound(NodeId),

    /// Invalid search parameters
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// Malformed graph handed to the engine
    #[error(transparent)]
    Graph(GraphError),
}

impl From<GraphError> for SearchError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::NotFound(id) => SearchError::NotFound(id),
            other => SearchError::Graph(other),
        }
    }
}
