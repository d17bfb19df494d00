//! Great-circle distance utility.
//!
//! One formula, used everywhere a distance appears: haversine over the mean
//! Earth radius, rounded to two decimals. Deterministic for a given pair of
//! coordinates regardless of entity kind.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether the coordinate lies in the valid lat/lon ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Haversine great-circle distance between two points, in kilometers,
/// rounded to two decimals.
///
/// Symmetric; `distance_km(p, p) == 0.0`.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let central = 2.0 * h.sqrt().asin();

    round2(EARTH_RADIUS_KM * central)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        let p = GeoPoint::new(12.9716, 77.5946);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(12.9716, 77.5946);
        let b = GeoPoint::new(13.0827, 80.2707);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn bengaluru_to_chennai_roughly_290km() {
        // City-center coordinates; haversine gives ~290 km.
        let bengaluru = GeoPoint::new(12.9716, 77.5946);
        let chennai = GeoPoint::new(13.0827, 80.2707);
        let d = distance_km(bengaluru, chennai);
        assert!((280.0..300.0).contains(&d), "got {d}");
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let a = GeoPoint::new(12.90, 77.60);
        let b = GeoPoint::new(12.93, 77.61);
        let d = distance_km(a, b);
        assert_eq!(d, round2(d));
    }

    #[test]
    fn short_hop_is_small_but_nonzero() {
        let a = GeoPoint::new(12.9000, 77.6000);
        let b = GeoPoint::new(12.9010, 77.6000);
        let d = distance_km(a, b);
        assert!(d > 0.0 && d < 0.5, "got {d}");
    }

    #[test]
    fn coordinate_range_validation() {
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
    }
}
