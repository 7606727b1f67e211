/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude of the hostel, in degrees.
pub const HOSTEL_LAT: f64 = 12.9352;

/// Longitude of the hostel, in degrees.
pub const HOSTEL_LON: f64 = 77.6245;

/// Great-circle distance in kilometers between two points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` slightly above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * a.clamp(0.0, 1.0).sqrt().asin()
}

/// Distance in kilometers from a home location to the hostel.
pub fn distance_to_hostel(home_lat: f64, home_lon: f64) -> f64 {
    haversine_km(home_lat, home_lon, HOSTEL_LAT, HOSTEL_LON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point() {
        assert_eq!(distance_to_hostel(HOSTEL_LAT, HOSTEL_LON), 0.0);
    }

    #[test]
    fn test_symmetric_and_positive() {
        let d1 = haversine_km(28.6139, 77.2090, 19.0760, 72.8777);
        let d2 = haversine_km(19.0760, 72.8777, 28.6139, 77.2090);
        assert!((d1 - d2).abs() < 1e-9);
        // Delhi to Mumbai is about 1150 km as the crow flies.
        assert!((1100.0..1200.0).contains(&d1), "{d1}");
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_antipodes() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }
}
