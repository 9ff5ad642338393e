//! Geographic coordinates.
//!
//! All positions in Pulsemap are WGS84 longitude/latitude pairs in
//! degrees. The point `(0, 0)` doubles as the "unknown coordinate"
//! sentinel used throughout the ingestion contract: a feed record that
//! cannot be geolocated carries the sentinel instead of failing.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeoPoint {
    /// Longitude in degrees, positive east.
    pub lon: f64,
    /// Latitude in degrees, positive north.
    pub lat: f64,
}

impl GeoPoint {
    /// The unknown-coordinate sentinel `(0, 0)`.
    pub const ORIGIN: Self = Self { lon: 0.0, lat: 0.0 };

    /// Create a point from longitude and latitude in degrees.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether this point is the unknown-coordinate sentinel.
    ///
    /// The sentinel is an exact `(0, 0)` match: the ingestion contract
    /// transmits it literally, so no epsilon applies here.
    #[allow(clippy::float_cmp)]
    pub fn is_origin(self) -> bool {
        self.lon == 0.0 && self.lat == 0.0
    }

    /// Whether this point coincides with `other` within `epsilon_deg`
    /// degrees on both axes.
    pub fn coincides_with(self, other: Self, epsilon_deg: f64) -> bool {
        (self.lon - other.lon).abs() < epsilon_deg && (self.lat - other.lat).abs() < epsilon_deg
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_sentinel() {
        assert!(GeoPoint::ORIGIN.is_origin());
        assert!(!GeoPoint::new(0.0, 20.0).is_origin());
        assert!(!GeoPoint::new(-0.1, 0.0).is_origin());
    }

    #[test]
    fn coincidence_respects_epsilon() {
        let a = GeoPoint::new(10.0, 20.0);
        let b = GeoPoint::new(10.005, 20.003);
        assert!(a.coincides_with(b, 0.01));
        assert!(!a.coincides_with(GeoPoint::new(10.02, 20.0), 0.01));
    }

    #[test]
    fn converts_from_wire_pair() {
        let p = GeoPoint::from([139.69, 35.68]);
        assert_eq!(p.lon, 139.69);
        assert_eq!(p.lat, 35.68);
    }
}
