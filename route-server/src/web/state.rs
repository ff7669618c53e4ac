//! Application state for the web layer.

use std::sync::Arc;

use crate::directions::DirectionsClient;
use crate::matrix::MatrixClient;
use crate::search::SearchConfig;
use crate::stations::StationSource;

/// Shared application state.
///
/// Without a matrix client graphs are built offline from great-circle
/// distances; without a directions client no polyline is attached.
#[derive(Clone)]
pub struct AppState {
    /// Where candidate stations come from
    pub stations: StationSource,

    /// Distance Matrix client
    pub matrix: Option<Arc<MatrixClient>>,

    /// Directions client
    pub directions: Option<Arc<DirectionsClient>>,

    /// Server-wide search defaults
    pub search: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state with no live graph or directions collaborators.
    pub fn new(stations: impl Into<StationSource>, search: SearchConfig) -> Self {
        Self {
            stations: stations.into(),
            matrix: None,
            directions: None,
            search: Arc::new(search),
        }
    }

    /// Build graphs from the Distance Matrix API.
    pub fn with_matrix(mut self, client: MatrixClient) -> Self {
        self.matrix = Some(Arc::new(client));
        self
    }

    /// Attach road polylines from the Directions API.
    pub fn with_directions(mut self, client: DirectionsClient) -> Self {
        self.directions = Some(Arc::new(client));
        self
    }

    /// Whether any collaborator talks to the Maps API.
    pub fn has_key(&self) -> bool {
        self.stations.is_live() || self.matrix.is_some() || self.directions.is_some()
    }
}
