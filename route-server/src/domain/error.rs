//! Domain error types.
//!
//! These errors represent validation failures of boundary values. They are
//! distinct from graph, search and API/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Node identifier is empty or blank
    #[error("node id must not be empty")]
    EmptyNodeId,

    /// Coordinate is out of range or not finite
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),

    /// Weight mode name is not recognised
    #[error("weight must be 'distance' or 'duration', got '{0}'")]
    UnknownWeightMode(String),
}
