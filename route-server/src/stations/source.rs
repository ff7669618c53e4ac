//! Dispatch between live and fixed station sources.

use std::sync::Arc;

use crate::cache::CachedPlacesClient;
use crate::domain::{Coordinate, Station};

use super::error::StationError;
use super::fixed::FixedStations;

/// Where nearby stations come from.
#[derive(Clone)]
pub enum StationSource {
    /// Places API, behind a TTL cache
    Live(Arc<CachedPlacesClient>),
    /// Fixed list loaded at startup
    Fixed(Arc<FixedStations>),
}

impl StationSource {
    /// Stations within `radius_m` metres of `center`.
    pub async fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Station>, StationError> {
        match self {
            StationSource::Live(client) => {
                let stations = client.nearby(center, radius_m).await?;
                Ok(stations.as_ref().clone())
            }
            StationSource::Fixed(fixed) => Ok(fixed.nearby(center, radius_m)),
        }
    }

    /// Whether lookups go over the network.
    pub fn is_live(&self) -> bool {
        matches!(self, StationSource::Live(_))
    }
}

impl From<FixedStations> for StationSource {
    fn from(fixed: FixedStations) -> Self {
        StationSource::Fixed(Arc::new(fixed))
    }
}

impl From<CachedPlacesClient> for StationSource {
    fn from(client: CachedPlacesClient) -> Self {
        StationSource::Live(Arc::new(client))
    }
}
