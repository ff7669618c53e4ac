//! Domain types for route search.
//!
//! Identifiers, coordinates and stations are validated at the boundary so
//! the search core only ever sees well-formed values.

mod coordinate;
mod error;
mod node;
mod station;
mod weight;

pub use coordinate::Coordinate;
pub use error::DomainError;
pub use node::NodeId;
pub use station::{Station, merge_stations};
pub use weight::WeightMode;
