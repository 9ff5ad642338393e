//! Per-frame derived visual state.
//!
//! These types are the engine's output contract with the renderer: a
//! [`FrameSample`] is recomputed from scratch on every render tick from
//! each event's age and the process-wide phase schedule, then handed to
//! the renderer as-is. Nothing here is ever persisted or mutated between
//! frames.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geo::GeoPoint;

/// What role an endpoint marker plays, which drives its base radius and
/// color treatment in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum MarkerKind {
    /// Flare at the attack's origin.
    Source,
    /// Flare at the attack's target.
    Destination,
    /// Pulsing marker for an attack whose source and target coincide.
    SelfPulse,
    /// Fallback marker for an event with no resolvable coordinates.
    Ambient,
}

/// Visual state of one geodesic arc for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ArcVisual {
    /// Arc start position.
    pub source: GeoPoint,
    /// Arc end position.
    pub target: GeoPoint,
    /// Apex height factor, proportional to great-circle distance.
    pub height: f64,
    /// Current opacity in `[0, 255]`.
    pub alpha: u8,
}

/// Visual state of one endpoint marker for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarkerVisual {
    /// Marker position.
    pub position: GeoPoint,
    /// Marker role.
    pub kind: MarkerKind,
    /// Current opacity in `[0, 255]`, kind-specific damping applied.
    pub alpha: u8,
    /// Render scale multiplier applied to the kind's base radius.
    pub scale: f64,
}

/// One frame's complete visual output across all active events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FrameSample {
    /// Arcs to draw this frame (invisible arcs omitted).
    pub arcs: Vec<ArcVisual>,
    /// Endpoint markers to draw this frame (invisible markers omitted).
    pub markers: Vec<MarkerVisual>,
}

impl FrameSample {
    /// Whether this frame has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty() && self.markers.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_reports_empty() {
        let frame = FrameSample::default();
        assert!(frame.is_empty());
    }

    #[test]
    fn frame_serializes_to_json() {
        let frame = FrameSample {
            arcs: vec![ArcVisual {
                source: GeoPoint::new(2.2, 48.8),
                target: GeoPoint::new(-77.0, 38.9),
                height: 0.25,
                alpha: 128,
            }],
            markers: vec![MarkerVisual {
                position: GeoPoint::new(2.2, 48.8),
                kind: MarkerKind::Source,
                alpha: 255,
                scale: 1.0,
            }],
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"alpha\":128"));
        assert!(json.contains("\"Source\""));
    }
}
