//! Distance Matrix HTTP client.
//!
//! The station set is split into origin x destination blocks so each
//! request stays under the API's per-side and element limits. Blocks are
//! fetched concurrently, bounded by a semaphore.

use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Station, WeightMode};
use crate::graph::Graph;

use super::error::MatrixError;
use super::types::MatrixResponse;

/// Default base URL for the Distance Matrix API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default element limit per request (origins x destinations).
const DEFAULT_MAX_ELEMENTS: usize = 100;

/// Default limit on origins, and on destinations, per request.
const DEFAULT_MAX_DIMENSION: usize = 25;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the Distance Matrix client.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum elements per request
    pub max_elements: usize,
    /// Maximum origins, and maximum destinations, per request
    pub max_dimension: usize,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MatrixConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_elements: DEFAULT_MAX_ELEMENTS,
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 5,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the element limit per request.
    pub fn with_max_elements(mut self, n: usize) -> Self {
        self.max_elements = n;
        self
    }

    /// Set the per-side limit on origins and destinations.
    pub fn with_max_dimension(mut self, n: usize) -> Self {
        self.max_dimension = n;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Distance Matrix API client.
#[derive(Debug, Clone)]
pub struct MatrixClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_elements: usize,
    max_dimension: usize,
    semaphore: Arc<Semaphore>,
}

impl MatrixClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MatrixConfig) -> Result<Self, MatrixError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            max_elements: config.max_elements.max(1),
            max_dimension: config.max_dimension.max(1),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Origins and destinations per request for `stations` stations.
    fn block_shape(&self, stations: usize) -> (usize, usize) {
        let cols = stations.min(self.max_dimension).min(self.max_elements).max(1);
        let rows = (self.max_elements / cols).min(self.max_dimension).max(1);
        (rows, cols)
    }

    /// Build a graph over `stations` weighted by road distance or travel time.
    ///
    /// Every station becomes a node. Fewer than two stations never touches
    /// the network.
    pub async fn build_graph(
        &self,
        stations: &[Station],
        mode: WeightMode,
    ) -> Result<Graph, MatrixError> {
        let mut graph = Graph::new();
        for station in stations {
            graph.add_node(station.id.clone());
        }
        if stations.len() < 2 {
            return Ok(graph);
        }

        let (rows, cols) = self.block_shape(stations.len());
        let blocks: Vec<(&[Station], &[Station])> = stations
            .chunks(rows)
            .flat_map(|origins| stations.chunks(cols).map(move |dests| (origins, dests)))
            .collect();
        let responses = try_join_all(
            blocks
                .iter()
                .map(|(origins, destinations)| self.fetch(origins, destinations)),
        )
        .await?;

        for ((origins, destinations), response) in blocks.iter().zip(&responses) {
            add_rows(&mut graph, origins, destinations, response, mode)?;
        }

        debug!(
            stations = stations.len(),
            requests = blocks.len(),
            edges = graph.edge_count(),
            %mode,
            "built matrix graph"
        );
        Ok(graph)
    }

    /// Fetch one origins x destinations block.
    async fn fetch(
        &self,
        origins: &[Station],
        destinations: &[Station],
    ) -> Result<MatrixResponse, MatrixError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MatrixError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("origins", join_locations(origins)),
                ("destinations", join_locations(destinations)),
                ("mode", "driving".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MatrixError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MatrixError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MatrixError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_matrix_response(&body)
    }
}

/// Format stations as a `lat,lng|lat,lng` list.
fn join_locations(stations: &[Station]) -> String {
    stations
        .iter()
        .map(|s| format!("{},{}", s.lat, s.lng))
        .collect::<Vec<_>>()
        .join("|")
}

/// Parse a response body, rejecting request-level failures.
fn parse_matrix_response(body: &str) -> Result<MatrixResponse, MatrixError> {
    let response: MatrixResponse = serde_json::from_str(body).map_err(|e| MatrixError::Json {
        message: e.to_string(),
    })?;

    match response.status.as_deref() {
        None | Some("OK") => Ok(response),
        Some(other) => Err(MatrixError::Status {
            status: other.to_string(),
            message: response.error_message.clone().unwrap_or_default(),
        }),
    }
}

/// Add the edges of one response block to `graph`.
///
/// Row `i` holds costs from `origins[i]` to each of `destinations`.
/// Unrouted or missing elements leave the edge absent.
pub fn add_rows(
    graph: &mut Graph,
    origins: &[Station],
    destinations: &[Station],
    response: &MatrixResponse,
    mode: WeightMode,
) -> Result<(), MatrixError> {
    if response.rows.len() != origins.len() {
        return Err(MatrixError::Shape {
            expected: origins.len(),
            actual: response.rows.len(),
        });
    }

    for (origin, row) in origins.iter().zip(&response.rows) {
        for (destination, element) in destinations.iter().zip(&row.elements) {
            if origin.id == destination.id {
                continue;
            }
            if let Some(weight) = element.weight(mode) {
                graph.add_edge(origin.id.clone(), destination.id.clone(), weight)?;
            }
        }
    }
    Ok(())
}
