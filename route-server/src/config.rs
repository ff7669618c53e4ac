//! Server configuration.
//!
//! Everything is read once at startup into an [`AppConfig`] value that is
//! passed explicitly to the parts that need it. Missing optional keys fall
//! back to defaults; malformed values are errors.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::directions::DirectionsConfig;
use crate::matrix::MatrixConfig;
use crate::stations::PlacesConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default collaborator request timeout in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Maps API key (`GOOGLE_MAPS_API_KEY`); collaborators are offline without it
    pub api_key: Option<String>,
    /// Listen address (`ROUTE_BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Offline station fixture (`ROUTE_STATIONS_FILE`)
    pub stations_file: Option<PathBuf>,
    /// Collaborator request timeout (`ROUTE_HTTP_TIMEOUT_SECS`)
    pub http_timeout_secs: u64,
    /// Places endpoint override (`ROUTE_PLACES_URL`)
    pub places_url: Option<String>,
    /// Distance Matrix endpoint override (`ROUTE_MATRIX_URL`)
    pub matrix_url: Option<String>,
    /// Directions endpoint override (`ROUTE_DIRECTIONS_URL`)
    pub directions_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            stations_file: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            places_url: None,
            matrix_url: None,
            directions_url: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration from a `.env`-style file, ignoring the process
    /// environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut vars = std::collections::HashMap::new();
        for item in dotenvy::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr: SocketAddr = get("ROUTE_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "ROUTE_BIND_ADDR",
                message: e.to_string(),
            })?;

        let http_timeout_secs: u64 = match get("ROUTE_HTTP_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    key: "ROUTE_HTTP_TIMEOUT_SECS",
                    message: e.to_string(),
                }
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: get("GOOGLE_MAPS_API_KEY"),
            bind_addr,
            stations_file: get("ROUTE_STATIONS_FILE").map(PathBuf::from),
            http_timeout_secs,
            places_url: get("ROUTE_PLACES_URL"),
            matrix_url: get("ROUTE_MATRIX_URL"),
            directions_url: get("ROUTE_DIRECTIONS_URL"),
        })
    }

    /// Whether a Maps API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Places client settings, if an API key is configured.
    pub fn places_config(&self) -> Option<PlacesConfig> {
        let mut config = PlacesConfig::new(self.api_key.as_deref()?)
            .with_timeout(self.http_timeout_secs);
        if let Some(url) = &self.places_url {
            config = config.with_base_url(url);
        }
        Some(config)
    }

    /// Distance Matrix client settings, if an API key is configured.
    pub fn matrix_config(&self) -> Option<MatrixConfig> {
        let mut config = MatrixConfig::new(self.api_key.as_deref()?)
            .with_timeout(self.http_timeout_secs);
        if let Some(url) = &self.matrix_url {
            config = config.with_base_url(url);
        }
        Some(config)
    }

    /// Directions client settings, if an API key is configured.
    pub fn directions_config(&self) -> Option<DirectionsConfig> {
        let mut config = DirectionsConfig::new(self.api_key.as_deref()?)
            .with_timeout(self.http_timeout_secs);
        if let Some(url) = &self.directions_url {
            config = config.with_base_url(url);
        }
        Some(config)
    }
}
