//! Offline graph construction from station coordinates.
//!
//! Used when no distance-matrix service is configured or the service fails.
//! Every station is connected to every other station.

use tracing::debug;

use crate::domain::{Station, WeightMode};
use crate::geo::haversine;
use crate::search::SPEED_EPSILON;

use super::{Graph, GraphError};

/// Build a complete directed graph weighted by great-circle distance.
///
/// In `Duration` mode each weight is the distance divided by `speed_mps`.
/// Every station id appears as a graph key.
pub fn offline_graph(
    stations: &[Station],
    mode: WeightMode,
    speed_mps: f64,
) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();

    for from in stations {
        graph.add_node(from.id.clone());
        for to in stations {
            if from.id == to.id {
                continue;
            }
            let metres = haversine(from.coordinate(), to.coordinate());
            let weight = match mode {
                WeightMode::Distance => metres,
                WeightMode::Duration => metres / speed_mps.max(SPEED_EPSILON),
            };
            graph.add_edge(from.id.clone(), to.id.clone(), weight)?;
        }
    }

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        %mode,
        "built offline graph"
    );
    Ok(graph)
}
