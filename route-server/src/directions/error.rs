//! Directions error types.

use super::polyline::PolylineError;

/// Errors from the Directions client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check GOOGLE_MAPS_API_KEY")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 200 but reported a failure status in the body
    #[error("directions status {status}: {message}")]
    Status { status: String, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Overview polyline could not be decoded
    #[error("bad overview polyline: {0}")]
    Polyline(#[from] PolylineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DirectionsError::Polyline(PolylineError::Truncated);
        assert_eq!(
            err.to_string(),
            "bad overview polyline: polyline ends in the middle of a value"
        );

        let err = DirectionsError::Api {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "API error 502: Bad Gateway");
    }
}
