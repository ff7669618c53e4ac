//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::directions::RoutePolyline;
use crate::domain::{NodeId, Station, WeightMode};
use crate::graph::Positions;
use crate::search::{
    Algorithm, AlgorithmChoice, Attempt, BenchEntry, Comparison, SearchConfig, SearchError,
};

fn default_radius() -> u32 {
    3000
}

fn default_restarts() -> usize {
    5
}

fn default_max_steps() -> usize {
    2000
}

fn default_speed() -> f64 {
    10.0
}

fn default_weight() -> String {
    "distance".to_string()
}

fn default_algorithm() -> String {
    "a_star".to_string()
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: &'static str,
    /// Whether live collaborators are configured
    pub has_key: bool,
}

/// Query for nearby stations.
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    pub lat: f64,
    pub lng: f64,

    /// Search radius in metres
    #[serde(default = "default_radius")]
    pub radius: u32,
}

/// Request to plan a route between two points.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveRequest {
    pub start_lat: f64,
    pub start_lng: f64,
    pub goal_lat: f64,
    pub goal_lng: f64,

    /// Radius (metres) searched for stations around both endpoints
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Hill-climbing walks
    #[serde(default = "default_restarts")]
    pub restarts: usize,

    /// Moves per hill-climbing walk
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Speed for duration estimates, m/s
    #[serde(default = "default_speed")]
    pub speed_mps: f64,

    /// "distance", "duration" or "time"
    #[serde(default = "default_weight")]
    pub weight: String,

    /// "a_star", "hill_climbing" or "both"
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Attach a road polyline for the chosen path
    #[serde(default)]
    pub with_directions: bool,

    /// Seed for hill-climbing restart noise
    #[serde(default)]
    pub seed: Option<u64>,
}

impl LiveRequest {
    /// Parsed algorithm selection.
    pub fn algorithm_choice(&self) -> Result<AlgorithmChoice, SearchError> {
        self.algorithm.parse()
    }

    /// Search settings for this request, layered over the server defaults.
    pub fn search_config(&self, base: &SearchConfig) -> Result<SearchConfig, SearchError> {
        let mode: WeightMode = self
            .weight
            .parse()
            .map_err(|e: crate::domain::DomainError| SearchError::InvalidRequest(e.to_string()))?;

        let mut config = SearchConfig {
            mode,
            speed_mps: self.speed_mps,
            max_steps: self.max_steps,
            restarts: self.restarts,
            ..base.clone()
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

/// A station as shown to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub lat: f64,
    pub lng: f64,
    pub name: Option<String>,
}

impl NodeView {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            lat: station.lat,
            lng: station.lng,
            name: station.name.clone(),
        }
    }
}

/// GeoJSON LineString geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[lng, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

/// Properties attached to the path feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathProperties {
    pub algorithm: Algorithm,
    pub cost: Option<f64>,
}

/// GeoJSON Feature for the chosen path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: LineString,
    pub properties: PathProperties,
}

impl PathFeature {
    /// Project `path` through `positions` into a LineString feature.
    pub fn new(
        path: &[NodeId],
        positions: &Positions,
        algorithm: Algorithm,
        cost: Option<f64>,
    ) -> Self {
        let coordinates = positions
            .project(path)
            .into_iter()
            .map(|c| c.to_lng_lat())
            .collect();

        Self {
            kind: "Feature",
            geometry: LineString {
                kind: "LineString",
                coordinates,
            },
            properties: PathProperties { algorithm, cost },
        }
    }
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct LiveResponse {
    /// Every candidate station, by id
    pub nodes: BTreeMap<String, NodeView>,
    pub path_ids: Vec<NodeId>,
    pub path_geojson: PathFeature,
    pub cost: Option<f64>,
    pub expanded: usize,
    pub runtime_ms: f64,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<Vec<Attempt>>,
    pub bench: BTreeMap<Algorithm, BenchEntry>,
    /// Strategy whose result fills the top-level fields
    pub algorithm: Algorithm,
    pub weight: WeightMode,
    pub start_node: NodeId,
    pub goal_node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions: Option<RoutePolyline>,
}

impl LiveResponse {
    /// Assemble the response from a finished comparison.
    pub fn build(
        stations: &[Station],
        positions: &Positions,
        comparison: &Comparison,
        weight: WeightMode,
    ) -> Self {
        let primary = comparison.primary_result();
        let nodes = stations
            .iter()
            .map(|s| (s.id.to_string(), NodeView::from_station(s)))
            .collect();

        Self {
            nodes,
            path_ids: primary.path.clone(),
            path_geojson: PathFeature::new(
                &primary.path,
                positions,
                comparison.primary(),
                primary.cost,
            ),
            cost: primary.cost,
            expanded: primary.expanded,
            runtime_ms: primary.runtime_ms,
            found: primary.found,
            attempts: primary.attempts.clone(),
            bench: comparison.bench(),
            algorithm: comparison.primary(),
            weight,
            start_node: primary.start.clone(),
            goal_node: primary.goal.clone(),
            directions: None,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
