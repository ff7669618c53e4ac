//! Node identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Opaque identifier of a graph node (a station's place id).
///
/// Unique within a graph instance. Ordering is lexicographic and is used as
/// the deterministic tie-break key by the search strategies.
///
/// # Examples
///
/// ```
/// use route_server::domain::NodeId;
///
/// let id = NodeId::parse("ChIJ-stop-1").unwrap();
/// assert_eq!(id.as_str(), "ChIJ-stop-1");
///
/// // Blank identifiers are rejected
/// assert!(NodeId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Create an identifier without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an identifier, rejecting empty or blank strings.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::EmptyNodeId);
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(DomainError::EmptyNodeId);
        }
        Ok(Self(s))
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
