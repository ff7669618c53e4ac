//! Station source backed by a fixed list, for offline use and tests.
//!
//! Loads stations from a JSON array of `{id, name?, lat, lng}` objects and
//! answers radius queries locally.

use std::path::Path;

use crate::domain::{Coordinate, Station};
use crate::geo::haversine;

use super::error::StationError;

/// A fixed set of stations.
#[derive(Debug, Clone, Default)]
pub struct FixedStations {
    stations: Vec<Station>,
}

impl FixedStations {
    /// Create a source from an in-memory list.
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Load stations from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| StationError::Fixture {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        let stations: Vec<Station> =
            serde_json::from_str(&json).map_err(|e| StationError::Fixture {
                message: format!("failed to parse {:?}: {}", path, e),
            })?;

        Ok(Self { stations })
    }

    /// Stations within `radius_m` metres of `center`, in file order.
    pub fn nearby(&self, center: Coordinate, radius_m: u32) -> Vec<Station> {
        self.stations
            .iter()
            .filter(|s| haversine(s.coordinate(), center) <= f64::from(radius_m))
            .cloned()
            .collect()
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the source holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
