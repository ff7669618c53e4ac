//! Places Nearby Search client.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Coordinate, NodeId, Station};

use super::error::StationError;

/// Default base URL for the Places Nearby Search API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Place type requested from the API.
const DEFAULT_PLACE_TYPE: &str = "bus_station";

/// Raw nearby-search response.
#[derive(Debug, Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Minimal DTO for a place - we only need id, name and location.
#[derive(Debug, Deserialize)]
struct PlaceDto {
    place_id: String,
    #[serde(default)]
    name: Option<String>,
    geometry: GeometryDto,
}

#[derive(Debug, Deserialize)]
struct GeometryDto {
    location: LatLngDto,
}

#[derive(Debug, Deserialize)]
struct LatLngDto {
    lat: f64,
    lng: f64,
}

/// Configuration for the Places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Place type to search for
    pub place_type: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            place_type: DEFAULT_PLACE_TYPE.to_string(),
            timeout_secs: 5,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the place type to search for.
    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = place_type.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the Places Nearby Search API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    place_type: String,
}

impl PlacesClient {
    /// Create a new Places client.
    pub fn new(config: PlacesConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            place_type: config.place_type,
        })
    }

    /// Fetch stations within `radius_m` metres of `center`.
    pub async fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Station>, StationError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("location", format!("{},{}", center.lat, center.lng)),
                ("radius", radius_m.to_string()),
                ("type", self.place_type.clone()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StationError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let stations = parse_nearby_response(&body)?;
        debug!(
            lat = center.lat,
            lng = center.lng,
            radius_m,
            count = stations.len(),
            "fetched nearby stations"
        );
        Ok(stations)
    }
}

/// Parse a nearby-search body into stations, skipping malformed places.
pub fn parse_nearby_response(body: &str) -> Result<Vec<Station>, StationError> {
    let response: NearbyResponse =
        serde_json::from_str(body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

    match response.status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => {}
        Some(other) => {
            return Err(StationError::Status {
                status: other.to_string(),
                message: response.error_message.unwrap_or_default(),
            });
        }
    }

    Ok(response
        .results
        .into_iter()
        .filter_map(|value| serde_json::from_value::<PlaceDto>(value).ok())
        .filter_map(|place| {
            let id = NodeId::parse(&place.place_id).ok()?;
            let coord =
                Coordinate::parse(place.geometry.location.lat, place.geometry.location.lng)
                    .ok()?;
            Some(Station {
                id,
                name: place.name,
                lat: coord.lat,
                lng: coord.lng,
            })
        })
        .collect())
}
