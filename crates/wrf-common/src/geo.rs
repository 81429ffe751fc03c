//! Geographic request types and the application extent.

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A user-drawn bounding rectangle expressed as two opposite corners.
///
/// Longitudes are negative (western hemisphere). Field names on the wire
/// are fixed by existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingQuery {
    pub bottom_left_lat: f64,
    pub bottom_left_lon: f64,
    pub top_right_lat: f64,
    pub top_right_lon: f64,
}

impl BoundingQuery {
    pub fn new(
        bottom_left_lat: f64,
        bottom_left_lon: f64,
        top_right_lat: f64,
        top_right_lon: f64,
    ) -> Self {
        Self {
            bottom_left_lat,
            bottom_left_lon,
            top_right_lat,
            top_right_lon,
        }
    }

    /// Corner ordering sanity check: bottom-left strictly below and west of
    /// top-right.
    pub fn is_ordered(&self) -> bool {
        self.bottom_left_lat < self.top_right_lat && self.bottom_left_lon < self.top_right_lon
    }
}

/// Latitude/longitude extent a coordinate must fall inside to be accepted
/// at the service boundary.
#[derive(Debug, Clone, Copy)]
pub struct Extent {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Extent {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Coordinate bounds accepted by the application (covers the BC-WRF domain
/// with margin).
pub const APP_EXTENT: Extent = Extent {
    min_lat: 45.0,
    max_lat: 63.0,
    min_lon: -146.0,
    max_lon: -106.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_ordering() {
        let q = BoundingQuery::new(49.0, -125.0, 51.0, -120.0);
        assert!(q.is_ordered());

        let flipped = BoundingQuery::new(51.0, -120.0, 49.0, -125.0);
        assert!(!flipped.is_ordered());
    }

    #[test]
    fn test_app_extent() {
        assert!(APP_EXTENT.contains(50.0, -125.0));
        assert!(!APP_EXTENT.contains(44.0, -125.0));
        assert!(!APP_EXTENT.contains(50.0, -105.0));
    }

    #[test]
    fn test_query_wire_names() {
        let q = BoundingQuery::new(49.0, -125.0, 51.0, -120.0);
        let json = serde_json::to_value(q).unwrap();
        assert!(json.get("bottomLeftLat").is_some());
        assert!(json.get("topRightLon").is_some());
    }
}
