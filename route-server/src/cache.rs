//! Caching layer for nearby-station lookups.
//!
//! Repeated `/live` requests around the same point hit the Places API with
//! the same query. Coordinates are snapped to a grid so small jitter in the
//! requested point still shares an entry.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Coordinate, Station};
use crate::stations::{PlacesClient, StationError};

/// Cache key: (lat grid cell, lng grid cell, radius in metres).
type NearbyKey = (i64, i64, u32);

/// Cached nearby-search result.
type NearbyEntry = Arc<Vec<Station>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Grid cell size in degrees.
    pub grid_deg: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
            grid_deg: 1e-4,
        }
    }
}

/// Cache for nearby-search responses.
pub struct NearbyCache {
    entries: MokaCache<NearbyKey, NearbyEntry>,
    grid_deg: f64,
}

impl NearbyCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            entries,
            grid_deg: config.grid_deg,
        }
    }

    /// Snap a query onto its cache key.
    fn key(&self, center: Coordinate, radius_m: u32) -> NearbyKey {
        let cell = |deg: f64| (deg / self.grid_deg).round() as i64;
        (cell(center.lat), cell(center.lng), radius_m)
    }

    /// Get a cached entry.
    pub async fn get(&self, center: Coordinate, radius_m: u32) -> Option<NearbyEntry> {
        self.entries.get(&self.key(center, radius_m)).await
    }

    /// Insert an entry into the cache.
    pub async fn insert(&self, center: Coordinate, radius_m: u32, entry: NearbyEntry) {
        self.entries.insert(self.key(center, radius_m), entry).await;
    }
}

/// Places client with caching.
pub struct CachedPlacesClient {
    client: PlacesClient,
    cache: NearbyCache,
}

impl CachedPlacesClient {
    /// Create a new cached client.
    pub fn new(client: PlacesClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: NearbyCache::new(cache_config),
        }
    }

    /// Nearby stations, using the cache if available.
    pub async fn nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
    ) -> Result<NearbyEntry, StationError> {
        if let Some(cached) = self.cache.get(center, radius_m).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.nearby(center, radius_m).await?);
        self.cache.insert(center, radius_m, entry.clone()).await;

        Ok(entry)
    }
}
