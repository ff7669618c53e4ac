//! Nearby-station lookup error types.

/// Errors that can occur when looking up nearby stations.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check GOOGLE_MAPS_API_KEY")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but reported a failure status in the body
    #[error("places status {status}: {message}")]
    Status { status: String, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Station fixture file could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
