//! Distance Matrix client.
//!
//! Builds a route graph from pairwise travel costs between stations. Each
//! element of the matrix becomes a directed edge; elements the API could
//! not route are left out, so the graph may be sparse or disconnected.

mod client;
mod error;
mod types;

pub use client::{MatrixClient, MatrixConfig, add_rows};
pub use error::MatrixError;
pub use types::{MatrixElement, MatrixResponse, MatrixRow, MatrixValue};
