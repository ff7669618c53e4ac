//! Edge weight units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// What an edge weight measures.
///
/// `Distance` weights are metres, `Duration` weights are seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
    #[default]
    Distance,
    #[serde(alias = "time")]
    Duration,
}

impl WeightMode {
    /// Name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightMode::Distance => "distance",
            WeightMode::Duration => "duration",
        }
    }

    /// Unit symbol for weights in this mode.
    pub fn unit(&self) -> &'static str {
        match self {
            WeightMode::Distance => "m",
            WeightMode::Duration => "s",
        }
    }
}

impl FromStr for WeightMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(WeightMode::Distance),
            "duration" | "time" => Ok(WeightMode::Duration),
            _ => Err(DomainError::UnknownWeightMode(s.to_string())),
        }
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
