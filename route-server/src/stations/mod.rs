//! Nearby-station lookup.
//!
//! Stations become the nodes of the route graph. They come either from the
//! Places Nearby Search API or from a fixed JSON file for offline use.

mod client;
mod error;
mod fixed;
mod source;

pub use client::{PlacesClient, PlacesConfig, parse_nearby_response};
pub use error::StationError;
pub use fixed::FixedStations;
pub use source::StationSource;
