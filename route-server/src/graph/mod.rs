//! Route graph model.
//!
//! A request-scoped weighted directed graph plus the coordinate of every
//! node. Both are built once by a collaborator and read by the search
//! strategies without mutation.

mod adjacency;
mod error;
mod offline;
mod positions;

pub use adjacency::{Graph, RawAdjacency};
pub use error::GraphError;
pub use offline::offline_graph;
pub use positions::Positions;
