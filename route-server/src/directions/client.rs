//! Directions HTTP client.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Coordinate;

use super::error::DirectionsError;
use super::polyline;

/// Default base URL for the Directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

/// A road-following line for a station path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePolyline {
    /// Overview polyline as returned by the API.
    pub encoded: String,
    /// Decoded points.
    pub coords: Vec<Coordinate>,
}

/// Configuration for the Directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Travel mode
    pub mode: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: "driving".to_string(),
            timeout_secs: 5,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API client.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    mode: String,
}

impl DirectionsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            mode: config.mode,
        })
    }

    /// Road route through `coords` in order.
    ///
    /// The first and last points are origin and destination; the rest are
    /// waypoints. Returns `None` for fewer than two points or when no route
    /// exists.
    pub async fn route(
        &self,
        coords: &[Coordinate],
    ) -> Result<Option<RoutePolyline>, DirectionsError> {
        let params = match query_params(coords) {
            Some(params) => params,
            None => return Ok(None),
        };

        let response = self
            .http
            .get(&self.base_url)
            .query(&params)
            .query(&[("mode", self.mode.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectionsError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let route = parse_directions_response(&body)?;
        debug!(
            waypoints = coords.len().saturating_sub(2),
            points = route.as_ref().map_or(0, |r| r.coords.len()),
            "fetched directions"
        );
        Ok(route)
    }
}

fn format_coord(c: &Coordinate) -> String {
    format!("{},{}", c.lat, c.lng)
}

/// Origin, destination and waypoint parameters, or `None` below two points.
fn query_params(coords: &[Coordinate]) -> Option<Vec<(&'static str, String)>> {
    let (first, rest) = coords.split_first()?;
    let (last, middle) = rest.split_last()?;

    let mut params = vec![
        ("origin", format_coord(first)),
        ("destination", format_coord(last)),
    ];
    if !middle.is_empty() {
        let waypoints: Vec<String> = middle.iter().map(format_coord).collect();
        params.push(("waypoints", waypoints.join("|")));
    }
    Some(params)
}

/// Parse a Directions body into the first route's overview polyline.
pub fn parse_directions_response(body: &str) -> Result<Option<RoutePolyline>, DirectionsError> {
    let response: DirectionsResponse =
        serde_json::from_str(body).map_err(|e| DirectionsError::Json {
            message: e.to_string(),
        })?;

    match response.status.as_deref() {
        None | Some("OK") => {}
        Some("ZERO_RESULTS") | Some("NOT_FOUND") => return Ok(None),
        Some(other) => {
            return Err(DirectionsError::Status {
                status: other.to_string(),
                message: response.error_message.unwrap_or_default(),
            });
        }
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Ok(None);
    };
    let encoded = route.overview_polyline.points;
    let coords = polyline::decode(&encoded)?;
    Ok(Some(RoutePolyline { encoded, coords }))
}
