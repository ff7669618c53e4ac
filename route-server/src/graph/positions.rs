//! Node coordinate lookup.

use std::collections::HashMap;

use crate::domain::{Coordinate, NodeId, Station};

use super::GraphError;

/// Mapping from node id to its coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positions {
    coords: HashMap<NodeId, Coordinate>,
}

impl Positions {
    /// Create an empty position map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the coordinates of a station list.
    pub fn from_stations(stations: &[Station]) -> Self {
        stations
            .iter()
            .map(|s| (s.id.clone(), s.coordinate()))
            .collect()
    }

    /// Set the coordinate of a node.
    pub fn insert(&mut self, id: NodeId, coord: Coordinate) {
        self.coords.insert(id, coord);
    }

    /// Coordinate of `id`, failing with `NotFound` if absent.
    pub fn position(&self, id: &NodeId) -> Result<Coordinate, GraphError> {
        self.coords
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NotFound(id.clone()))
    }

    /// Whether `id` has a coordinate.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.coords.contains_key(id)
    }

    /// Iterate over all known positions.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Coordinate)> {
        self.coords.iter()
    }

    /// Number of known positions.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns true if no positions are known.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Project a path onto its coordinate sequence.
    ///
    /// Ids without a known position are skipped.
    pub fn project(&self, path: &[NodeId]) -> Vec<Coordinate> {
        path.iter()
            .filter_map(|id| self.coords.get(id).copied())
            .collect()
    }
}

impl FromIterator<(NodeId, Coordinate)> for Positions {
    fn from_iter<I: IntoIterator<Item = (NodeId, Coordinate)>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}
