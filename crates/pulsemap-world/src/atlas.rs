//! Static country-centroid atlas.
//!
//! The visualization picks plausible endpoints from a fixed table of
//! country centroids instead of shipping full boundary polygons: the
//! synthetic generator needs representative points, and the feed layer
//! needs a name-to-coordinate lookup for records that arrive with
//! country names instead of coordinates. Unknown names resolve to the
//! `(0, 0)` sentinel so degraded data renders as an ambient marker
//! rather than failing.

use pulsemap_types::GeoPoint;
use tracing::debug;

/// One country with a representative centroid coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Country {
    /// Common English short name, as feeds typically report it.
    pub name: &'static str,
    /// Representative centroid, longitude/latitude in degrees.
    pub centroid: GeoPoint,
}

/// Representative centroids for the countries the feeds report most.
///
/// Coordinates are approximate geographic centroids, good to roughly a
/// degree, which is far below marker size at world zoom.
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("Argentina", -64.0, -34.0),
    ("Australia", 134.0, -25.0),
    ("Austria", 14.1, 47.6),
    ("Bangladesh", 90.3, 23.7),
    ("Belgium", 4.6, 50.6),
    ("Brazil", -53.0, -10.8),
    ("Bulgaria", 25.2, 42.8),
    ("Canada", -98.3, 61.4),
    ("Chile", -71.4, -37.7),
    ("China", 103.8, 36.6),
    ("Colombia", -73.1, 3.9),
    ("Czech Republic", 15.3, 49.8),
    ("Denmark", 9.3, 56.0),
    ("Egypt", 29.9, 26.5),
    ("Finland", 26.3, 64.5),
    ("France", 2.3, 46.6),
    ("Germany", 10.4, 51.1),
    ("Greece", 22.5, 39.1),
    ("Hungary", 19.4, 47.2),
    ("India", 79.6, 22.9),
    ("Indonesia", 113.9, -0.8),
    ("Iran", 54.3, 32.6),
    ("Iraq", 43.7, 33.0),
    ("Ireland", -8.1, 53.2),
    ("Israel", 35.0, 31.5),
    ("Italy", 12.1, 42.8),
    ("Japan", 138.0, 37.5),
    ("Kazakhstan", 67.3, 48.2),
    ("Kenya", 37.8, 0.6),
    ("Malaysia", 109.7, 3.8),
    ("Mexico", -102.5, 23.9),
    ("Morocco", -6.3, 31.9),
    ("Netherlands", 5.3, 52.1),
    ("New Zealand", 171.5, -41.8),
    ("Nigeria", 8.1, 9.6),
    ("North Korea", 127.2, 40.2),
    ("Norway", 15.3, 68.8),
    ("Pakistan", 69.4, 29.9),
    ("Peru", -74.4, -9.2),
    ("Philippines", 122.9, 11.8),
    ("Poland", 19.4, 52.1),
    ("Portugal", -8.5, 39.6),
    ("Romania", 25.0, 45.8),
    ("Russia", 96.7, 61.5),
    ("Saudi Arabia", 44.5, 24.1),
    ("Singapore", 103.8, 1.4),
    ("South Africa", 25.1, -29.0),
    ("South Korea", 127.8, 36.4),
    ("Spain", -3.6, 40.2),
    ("Sweden", 16.7, 62.8),
    ("Switzerland", 8.2, 46.8),
    ("Taiwan", 120.9, 23.7),
    ("Thailand", 101.0, 15.1),
    ("Turkey", 35.2, 39.1),
    ("Ukraine", 31.4, 49.0),
    ("United Arab Emirates", 54.3, 23.9),
    ("United Kingdom", -2.9, 54.1),
    ("United States", -98.6, 39.8),
    ("Vietnam", 106.3, 16.6),
];

/// Read-only lookup table of country centroids.
#[derive(Debug, Clone)]
pub struct CountryAtlas {
    countries: Vec<Country>,
}

impl CountryAtlas {
    /// Build the atlas from the built-in centroid table.
    pub fn new() -> Self {
        let countries = CENTROIDS
            .iter()
            .map(|&(name, lon, lat)| Country {
                name,
                centroid: GeoPoint::new(lon, lat),
            })
            .collect();
        Self { countries }
    }

    /// Number of countries in the atlas.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Whether the atlas is empty (never true for the built-in table).
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// The country at `index`, for random selection by the generator.
    pub fn get(&self, index: usize) -> Option<&Country> {
        self.countries.get(index)
    }

    /// All countries in the atlas.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Centroid of the named country, if known.
    pub fn centroid(&self, name: &str) -> Option<GeoPoint> {
        self.countries
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.centroid)
    }

    /// Centroid of the named country, or the `(0, 0)` sentinel when the
    /// name is unknown or missing.
    pub fn centroid_or_origin(&self, name: &str) -> GeoPoint {
        self.centroid(name).unwrap_or_else(|| {
            debug!(country = name, "unknown country, using origin sentinel");
            GeoPoint::ORIGIN
        })
    }
}

impl Default for CountryAtlas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn atlas_is_populated() {
        let atlas = CountryAtlas::new();
        assert!(atlas.len() >= 50);
        assert!(!atlas.is_empty());
    }

    #[test]
    fn lookup_known_country() {
        let atlas = CountryAtlas::new();
        let japan = atlas.centroid("Japan").unwrap();
        assert!((japan.lon - 138.0).abs() < 1e-9);
        assert!((japan.lat - 37.5).abs() < 1e-9);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let atlas = CountryAtlas::new();
        assert_eq!(atlas.centroid("france"), atlas.centroid("France"));
    }

    #[test]
    fn unknown_country_falls_back_to_origin() {
        let atlas = CountryAtlas::new();
        assert!(atlas.centroid("Atlantis").is_none());
        assert!(atlas.centroid_or_origin("Atlantis").is_origin());
    }

    #[test]
    fn no_centroid_is_the_sentinel() {
        // The sentinel must stay reserved for "unknown" -- a real country
        // centroid landing on (0, 0) would silently degrade to ambient.
        let atlas = CountryAtlas::new();
        assert!(atlas.countries().iter().all(|c| !c.centroid.is_origin()));
    }
}
