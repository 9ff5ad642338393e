//! Geographic reference data and geometry for the Pulsemap engine.
//!
//! # Modules
//!
//! - [`atlas`] -- Static country-centroid atlas consumed read-only by the
//!   synthetic event generator and the ingestion layer.
//! - [`geodesy`] -- Great-circle distance and the arc height derivation
//!   used for geodesic arc rendering.

pub mod atlas;
pub mod geodesy;

pub use atlas::{Country, CountryAtlas};
pub use geodesy::{ARC_HEIGHT_FACTOR, arc_height, great_circle_distance};
