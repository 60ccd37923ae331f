use serde::{Deserialize, Serialize};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine great-circle distance in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        // Rounding can push `a` just past 1 for antipodal points.
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_METERS * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let paris = GeoPoint::new(48.8566, 2.3522);
        assert!(paris.distance_meters(&paris).abs() < 1e-6);
    }

    #[test]
    fn test_paris_to_lyon_is_roughly_392_km() {
        let paris = GeoPoint::new(48.8566, 2.3522);
        let lyon = GeoPoint::new(45.7640, 4.8357);
        let km = paris.distance_meters(&lyon) / 1000.0;
        assert!((km - 392.0).abs() < 5.0, "got {km}");
    }

    #[test]
    fn test_antipodal_distance_is_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let meters = a.distance_meters(&b);
        assert!(!meters.is_nan());
        assert!((meters - EARTH_RADIUS_METERS * std::f64::consts::PI).abs() < 1.0);

        let c = GeoPoint::new(45.0, 30.0);
        let d = GeoPoint::new(-45.0, -150.0);
        assert!(!c.distance_meters(&d).is_nan());
    }
}
