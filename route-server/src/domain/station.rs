//! Station type supplied by the nearby-station collaborator.

use serde::{Deserialize, Serialize};

use super::{Coordinate, NodeId};

/// A stop that becomes a node of the route graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: NodeId,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl Station {
    /// Create a station.
    pub fn new(id: impl Into<String>, name: Option<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: NodeId::new(id),
            name,
            lat,
            lng,
        }
    }

    /// The station's position.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Merge station lists, keeping the first occurrence of each id.
pub fn merge_stations<I>(lists: I) -> Vec<Station>
where
    I: IntoIterator<Item = Vec<Station>>,
{
    let mut seen = std::collections::HashSet::new();
    let mut merged = Vec::new();
    for station in lists.into_iter().flatten() {
        if seen.insert(station.id.clone()) {
            merged.push(station);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_accessor() {
        let s = Station::new("S1", Some("Ben Thanh".into()), 10.772, 106.698);
        assert_eq!(s.coordinate(), Coordinate::new(10.772, 106.698));
    }

    #[test]
    fn merge_deduplicates_by_id() {
        let a = vec![
            Station::new("S1", Some("first".into()), 1.0, 1.0),
            Station::new("S2", None, 2.0, 2.0),
        ];
        let b = vec![
            Station::new("S2", Some("dup".into()), 9.0, 9.0),
            Station::new("S3", None, 3.0, 3.0),
        ];

        let merged = merge_stations([a, b]);
        let ids: Vec<&str> = merged.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);
        // First occurrence wins
        assert_eq!(merged[1].lat, 2.0);
    }

    #[test]
    fn deserialize_without_name() {
        let s: Station = serde_json::from_str(r#"{"id":"S1","lat":1.5,"lng":2.5}"#).unwrap();
        assert_eq!(s.name, None);
        assert_eq!(s.id, NodeId::new("S1"));
    }
}
