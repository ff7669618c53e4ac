//! Distance Matrix response DTOs.
//!
//! The API omits `distance` and `duration` on elements it could not route,
//! so everything below the row level is optional.

use serde::Deserialize;

use crate::domain::WeightMode;

/// Top-level Distance Matrix response.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixResponse {
    /// Request-level status ("OK" on success).
    #[serde(default)]
    pub status: Option<String>,

    /// Human-readable explanation when `status` is not "OK".
    #[serde(default)]
    pub error_message: Option<String>,

    /// One row per origin, in request order.
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

/// Costs from one origin to every destination.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

/// Cost from one origin to one destination.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixElement {
    /// Element status ("OK", "NOT_FOUND", "ZERO_RESULTS", ...).
    #[serde(default)]
    pub status: Option<String>,

    /// Road distance in metres.
    #[serde(default)]
    pub distance: Option<MatrixValue>,

    /// Travel time in seconds.
    #[serde(default)]
    pub duration: Option<MatrixValue>,
}

/// A numeric value with its display text.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixValue {
    pub value: f64,
    #[serde(default)]
    pub text: Option<String>,
}

impl MatrixElement {
    /// The edge weight for `mode`, if this element was routed.
    pub fn weight(&self, mode: WeightMode) -> Option<f64> {
        if self.status.as_deref().is_some_and(|s| s != "OK") {
            return None;
        }
        let value = match mode {
            WeightMode::Distance => self.distance.as_ref(),
            WeightMode::Duration => self.duration.as_ref(),
        };
        value.map(|v| v.value)
    }
}
