//! Directions client and encoded-polyline decoding.
//!
//! Used to draw a road-following line for the chosen station path. Failures
//! here never affect the search result.

mod client;
mod error;
pub mod polyline;

pub use client::{DirectionsClient, DirectionsConfig, RoutePolyline, parse_directions_response};
pub use error::DirectionsError;
pub use polyline::PolylineError;
