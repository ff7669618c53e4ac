//! Distance Matrix error types.

use crate::graph::GraphError;

/// Errors from the Distance Matrix client.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but reported a failure status in the body
    #[error("matrix status {status}: {message}")]
    Status { status: String, message: String },

    /// Invalid API key or unauthorized
    #[error("unauthorized: check GOOGLE_MAPS_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by Distance Matrix API")]
    RateLimited,

    /// Response rows don't line up with the requested origins
    #[error("matrix shape mismatch: expected {expected} rows, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// An element produced an edge the graph rejected
    #[error(transparent)]
    Graph(#[from] GraphError),
}
