//! Scale and style modulation for endpoint markers.
//!
//! Layered on top of the alpha envelope, markers carry secondary visual
//! parameters: they grow in during their fade-in window, self-referencing
//! events pulse continuously, and events with no resolvable coordinates
//! degrade to a single dim ambient marker at a fixed fallback position.
//! Everything here is a pure per-sample computation; nothing is cached
//! across frames.

use pulsemap_types::GeoPoint;

use crate::easing::ease;
use crate::schedule::PhaseWindow;

/// Coordinate tolerance, in degrees per axis, under which source and
/// destination count as the same point (a self-attack).
pub const SELF_ATTACK_EPSILON_DEG: f64 = 0.01;

/// Scale a marker starts at when it begins growing in.
pub const GROWTH_FLOOR: f64 = 0.3;

/// Resting scale of the self-attack pulse.
pub const PULSE_BASE_SCALE: f64 = 2.5;

/// Amplitude of the self-attack pulse swing.
pub const PULSE_SWING: f64 = 1.2;

/// Pulse angular speed in radians per millisecond of age.
pub const PULSE_ANGULAR_SPEED: f64 = 0.003;

/// Base scale of a destination marker whose source is unknown.
pub const DEST_EMPHASIS_SCALE: f64 = 4.0;

/// Base scale of the ambient fallback marker.
pub const AMBIENT_BASE_SCALE: f64 = 6.0;

/// Opacity damping applied to the ambient fallback marker.
pub const AMBIENT_ALPHA_FACTOR: f64 = 0.4;

/// Growth floor for the ambient marker (it grows from half size).
pub const AMBIENT_GROWTH_FLOOR: f64 = 0.5;

/// Fixed fallback position for the ambient marker.
pub const AMBIENT_POSITION: GeoPoint = GeoPoint::new(0.0, 20.0);

/// How an event's endpoint coordinates classify for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    /// Two distinct real endpoints: arc plus both flares.
    Transit,
    /// Real endpoints that coincide within epsilon: a pulsing
    /// destination marker, source suppressed, no visible arc.
    SelfAttack,
    /// Only the destination resolves: an emphasized destination marker.
    DestinationOnly,
    /// Only the source resolves: a lone source flare.
    SourceOnly,
    /// Neither endpoint resolves: the ambient fallback marker.
    Ambient,
}

/// Classify an event by its endpoint coordinates.
pub fn classify(source: GeoPoint, target: GeoPoint) -> EventShape {
    match (source.is_origin(), target.is_origin()) {
        (true, true) => EventShape::Ambient,
        (true, false) => EventShape::DestinationOnly,
        (false, true) => EventShape::SourceOnly,
        (false, false) => {
            if source.coincides_with(target, SELF_ATTACK_EPSILON_DEG) {
                EventShape::SelfAttack
            } else {
                EventShape::Transit
            }
        }
    }
}

/// Growth-on-appear scale for a marker inside its fade-in window.
///
/// Ramps from [`GROWTH_FLOOR`] to `1.0` through the shared easing curve
/// while the fade-in runs; `1.0` once the window has passed. A
/// zero-length fade-in appears at full scale immediately.
pub fn growth_scale(age_ms: u64, window: &PhaseWindow) -> f64 {
    scaled_growth(age_ms, window, GROWTH_FLOOR)
}

/// Growth-on-appear scale for the ambient marker, which starts at half
/// its base size rather than [`GROWTH_FLOOR`].
pub fn ambient_growth_scale(age_ms: u64, window: &PhaseWindow) -> f64 {
    scaled_growth(age_ms, window, AMBIENT_GROWTH_FLOOR)
}

/// Continuous pulse scale for a self-attack marker.
///
/// Runs on the raw age, independent of the fade envelope, so the pulse
/// keeps beating through the hold phase.
pub fn pulse_scale(age_ms: u64) -> f64 {
    PULSE_BASE_SCALE + (age_ms as f64 * PULSE_ANGULAR_SPEED).sin() * PULSE_SWING
}

/// Apply a fractional damping factor to an alpha value.
pub fn damp_alpha(alpha: u8, factor: f64) -> u8 {
    (f64::from(alpha) * factor).round().clamp(0.0, 255.0) as u8
}

/// Shared growth ramp with a configurable floor.
fn scaled_growth(age_ms: u64, window: &PhaseWindow, floor: f64) -> f64 {
    if window.fade_in_duration == 0 || age_ms >= window.fade_in_end() {
        return 1.0;
    }
    let elapsed = age_ms.saturating_sub(window.fade_in_start);
    let progress = (elapsed as f64 / window.fade_in_duration as f64).clamp(0.0, 1.0);
    floor + ease(progress) * (1.0 - floor)
}
