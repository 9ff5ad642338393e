//! Great-circle geometry on the WGS84 sphere.
//!
//! Distances are expressed as central angles in radians rather than
//! kilometers: the arc height derivation only needs a unit proportional
//! to angular separation, and the renderer's arc layer consumes the
//! height factor directly.

use pulsemap_types::GeoPoint;

/// Multiplier turning a central angle into an arc apex height factor.
pub const ARC_HEIGHT_FACTOR: f64 = 0.25;

/// Central angle between two points in radians, via the haversine formula.
///
/// Symmetric in its arguments and zero for coincident points. Accurate
/// enough at visualization scale; no ellipsoidal correction is applied.
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * h.sqrt().min(1.0).asin()
}

/// Apex height factor for the geodesic arc between two points.
///
/// Longer arcs rise higher; a degenerate arc between coincident points
/// has height zero.
pub fn arc_height(source: GeoPoint, target: GeoPoint) -> f64 {
    (great_circle_distance(source, target) * ARC_HEIGHT_FACTOR).max(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn coincident_points_have_zero_distance() {
        let p = GeoPoint::new(12.5, 41.9);
        assert!(great_circle_distance(p, p).abs() < EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let paris = GeoPoint::new(2.35, 48.85);
        let tokyo = GeoPoint::new(139.69, 35.68);
        let there = great_circle_distance(paris, tokyo);
        let back = great_circle_distance(tokyo, paris);
        assert!((there - back).abs() < EPSILON);
    }

    #[test]
    fn quarter_turn_on_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(90.0, 0.0);
        let angle = great_circle_distance(a, b);
        assert!((angle - core::f64::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn antipodes_are_half_a_turn_apart() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(180.0, 0.0);
        let angle = great_circle_distance(a, b);
        assert!((angle - core::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn arc_height_scales_with_distance() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(90.0, 0.0);
        let height = arc_height(a, b);
        assert!((height - core::f64::consts::FRAC_PI_2 * ARC_HEIGHT_FACTOR).abs() < 1e-6);
        assert!(arc_height(a, a).abs() < EPSILON);
    }
}
