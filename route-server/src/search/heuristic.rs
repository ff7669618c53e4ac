//! Remaining-cost estimate shared by both strategies.

use crate::domain::{Coordinate, NodeId, WeightMode};
use crate::geo::haversine;
use crate::graph::Positions;

use super::{SPEED_EPSILON, SearchError};

/// Great-circle distance to the goal, scaled to the weight unit.
pub(crate) struct Heuristic<'a> {
    positions: &'a Positions,
    goal: Coordinate,
    scale: f64,
}

impl<'a> Heuristic<'a> {
    /// Fails fast if either endpoint has no position.
    pub(crate) fn new(
        positions: &'a Positions,
        start: &NodeId,
        goal: &NodeId,
        mode: WeightMode,
        speed_mps: f64,
    ) -> Result<Self, SearchError> {
        positions.position(start)?;
        let goal = positions.position(goal)?;
        let scale = match mode {
            WeightMode::Distance => 1.0,
            WeightMode::Duration => 1.0 / speed_mps.max(SPEED_EPSILON),
        };
        Ok(Self {
            positions,
            goal,
            scale,
        })
    }

    /// Estimated remaining cost from `node` to the goal.
    pub(crate) fn estimate(&self, node: &NodeId) -> Result<f64, SearchError> {
        let here = self.positions.position(node)?;
        Ok(haversine(here, self.goal) * self.scale)
    }
}
