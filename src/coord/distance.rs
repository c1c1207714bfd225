//! Great-circle distance
//!
//! Haversine formula on the mean-radius sphere. Good to a fraction of a
//! percent at delivery-zone scales, which is all the matcher needs.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::Coordinate;
use std::f64::consts::PI;

/// Distance between two points in kilometers (haversine formula)
pub fn haversine_km(p1: Coordinate, p2: Coordinate) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check if a point is within a delivery circle
pub fn within_radius(point: Coordinate, center: Coordinate, radius_km: f64) -> bool {
    haversine_km(point, center) <= radius_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_haversine_symmetric() {
        let paris = Coordinate::new(48.8566, 2.3522);
        let berlin = Coordinate::new(52.5200, 13.4050);

        assert_relative_eq!(
            haversine_km(paris, berlin),
            haversine_km(berlin, paris),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = Coordinate::new(48.8566, 2.3522);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // One degree of latitude is about 111 km
        let a = Coordinate::new(40.7128, -74.0060);
        let b = Coordinate::new(41.7128, -74.0060);

        let distance = haversine_km(a, b);
        assert!(
            (distance - 111.0).abs() < 1.0,
            "Distance {} should be approximately 111 km",
            distance
        );
    }

    #[test]
    fn test_haversine_paris_to_arc_de_triomphe() {
        // Notre-Dame area to the Arc de Triomphe, about 5.3 km
        let center = Coordinate::new(48.8566, 2.3522);
        let arc = Coordinate::new(48.8738, 2.2950);

        let distance = haversine_km(center, arc);
        assert!(
            (distance - 5.3).abs() < 0.3,
            "Distance {} should be approximately 5.3 km",
            distance
        );
    }

    #[test]
    fn test_haversine_paris_to_berlin() {
        let paris = Coordinate::new(48.8566, 2.3522);
        let berlin = Coordinate::new(52.5200, 13.4050);

        let distance = haversine_km(paris, berlin);
        assert!(
            (distance - 878.0).abs() < 10.0,
            "Distance {} should be approximately 878 km",
            distance
        );
    }

    #[test]
    fn test_within_radius() {
        let center = Coordinate::new(48.8566, 2.3522);
        let arc = Coordinate::new(48.8738, 2.2950); // ~5.3 km away

        assert!(within_radius(arc, center, 10.0));
        assert!(!within_radius(arc, center, 3.0));
        assert!(within_radius(center, center, 1.0));
    }
}
