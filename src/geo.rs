//! Bounding-box validation for projected stations.

use crate::station::Station;

/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Approximate extent of Switzerland.
pub const SWITZERLAND: BoundingBox = BoundingBox {
    min_lat: 45.8,
    max_lat: 47.9,
    min_lon: 5.8,
    max_lon: 10.6,
};

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat)
            && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// `(0, 0)` marks a stop whose coordinates are unknown.
pub fn is_sentinel(lat: f64, lon: f64) -> bool {
    lat == 0.0 && lon == 0.0
}

#[derive(Debug, Clone, Copy)]
pub struct GeoValidator {
    bounds: BoundingBox,
}

impl Default for GeoValidator {
    fn default() -> Self {
        Self::new(SWITZERLAND)
    }
}

impl GeoValidator {
    pub fn new(bounds: BoundingBox) -> Self {
        Self { bounds }
    }

    /// Inside the box, or exactly on the unknown-coordinates sentinel.
    pub fn accepts(&self, station: &Station) -> bool {
        self.bounds.contains(station.lat, station.lon) || is_sentinel(station.lat, station.lon)
    }
}
