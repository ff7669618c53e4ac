//! Great-circle distance on a spherical Earth.

use crate::domain::{Coordinate, NodeId};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in metres.
///
/// Symmetric, zero for identical points, and satisfies the triangle
/// inequality, which is what makes it an admissible A* heuristic for
/// distance-weighted graphs.
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Clamp guards against h drifting above 1.0 for antipodal points.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Find the node closest to `target` by great-circle distance.
///
/// Ties resolve to the smallest `NodeId`. Returns `None` for an empty input.
pub fn nearest<'a, I>(nodes: I, target: Coordinate) -> Option<&'a NodeId>
where
    I: IntoIterator<Item = (&'a NodeId, &'a Coordinate)>,
{
    nodes
        .into_iter()
        .map(|(id, c)| (id, haversine(*c, target)))
        .min_by(|(ia, da), (ib, db)| da.total_cmp(db).then_with(|| ia.cmp(ib)))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_same_point() {
        let p = Coordinate::new(10.776, 106.700);
        assert_eq!(haversine(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((haversine(a, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn known_city_distance() {
        // Ben Thanh market to Tan Son Nhat airport, roughly 7.2 km
        let ben_thanh = Coordinate::new(10.7725, 106.6980);
        let airport = Coordinate::new(10.8188, 106.6519);
        let d = haversine(ben_thanh, airport);
        assert!((6_800.0..7_600.0).contains(&d), "got {d}");
    }

    #[test]
    fn antipodal_points() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let half_circumference = EARTH_RADIUS_M * std::f64::consts::PI;
        assert!((haversine(a, b) - half_circumference).abs() < 1e-3);
    }

    #[test]
    fn nearest_picks_closest() {
        let ids = [NodeId::new("A"), NodeId::new("B"), NodeId::new("C")];
        let coords = [
            Coordinate::new(10.0, 106.0),
            Coordinate::new(10.5, 106.5),
            Coordinate::new(11.0, 107.0),
        ];
        let target = Coordinate::new(10.45, 106.52);
        let found = nearest(ids.iter().zip(coords.iter()), target);
        assert_eq!(found, Some(&ids[1]));
    }

    #[test]
    fn nearest_breaks_ties_by_id() {
        let ids = [NodeId::new("Z"), NodeId::new("M")];
        let coords = [Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 1.0)];
        let found = nearest(ids.iter().zip(coords.iter()), Coordinate::new(0.0, 0.0));
        assert_eq!(found, Some(&ids[1]));
    }

    #[test]
    fn nearest_empty() {
        let empty: Vec<(&NodeId, &Coordinate)> = Vec::new();
        assert!(nearest(empty, Coordinate::new(0.0, 0.0)).is_none());
    }
}
