//! Pure per-frame visual state recomputation.
//!
//! `(event, now, schedule) -> visual state`, invoked by the render loop
//! for every active event on every frame. The sampler owns the shape
//! classification (arc + flares, self-pulse, degraded variants) and
//! composes the alpha envelope with the scale modulators; it knows
//! nothing about the renderer and caches nothing between frames.

use chrono::{DateTime, Utc};
use pulsemap_types::{ArcVisual, AttackEvent, FrameSample, MarkerKind, MarkerVisual};
use pulsemap_world::arc_height;

use crate::alpha::{arc_alpha, flare_alpha};
use crate::schedule::{Endpoint, PhaseSchedule};
use crate::style::{
    self, AMBIENT_ALPHA_FACTOR, AMBIENT_BASE_SCALE, AMBIENT_POSITION, DEST_EMPHASIS_SCALE,
    EventShape,
};

/// Visual state of a single event for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventVisual {
    /// The arc, when the event has one and it is currently visible.
    pub arc: Option<ArcVisual>,
    /// Visible endpoint markers (zero to two).
    pub markers: Vec<MarkerVisual>,
}

/// Compute one event's visual state at wall-clock time `now`.
///
/// Elements whose alpha evaluates to zero are omitted entirely, so a
/// fully faded event produces an empty visual (and is about to be
/// pruned by the store).
pub fn sample_event(
    event: &AttackEvent,
    now: DateTime<Utc>,
    schedule: &PhaseSchedule,
) -> EventVisual {
    let age = event.age_ms(now);
    let mut visual = EventVisual::default();

    match style::classify(event.source, event.target) {
        EventShape::Transit => {
            let alpha = arc_alpha(age, schedule);
            if alpha > 0 {
                visual.arc = Some(ArcVisual {
                    source: event.source,
                    target: event.target,
                    height: arc_height(event.source, event.target),
                    alpha,
                });
            }
            push_flare(
                &mut visual,
                event.source,
                MarkerKind::Source,
                age,
                Endpoint::Source,
                schedule,
                1.0,
            );
            push_flare(
                &mut visual,
                event.target,
                MarkerKind::Destination,
                age,
                Endpoint::Destination,
                schedule,
                1.0,
            );
        }
        EventShape::SelfAttack => {
            // The source marker is suppressed and the arc is degenerate;
            // the destination pulses through the whole envelope instead
            // of growing in.
            let alpha = flare_alpha(age, Endpoint::Destination, schedule);
            if alpha > 0 {
                visual.markers.push(MarkerVisual {
                    position: event.target,
                    kind: MarkerKind::SelfPulse,
                    alpha,
                    scale: style::pulse_scale(age),
                });
            }
        }
        EventShape::DestinationOnly => {
            push_flare(
                &mut visual,
                event.target,
                MarkerKind::Destination,
                age,
                Endpoint::Destination,
                schedule,
                DEST_EMPHASIS_SCALE,
            );
        }
        EventShape::SourceOnly => {
            push_flare(
                &mut visual,
                event.source,
                MarkerKind::Source,
                age,
                Endpoint::Source,
                schedule,
                1.0,
            );
        }
        EventShape::Ambient => {
            let envelope = flare_alpha(age, Endpoint::Destination, schedule);
            let alpha = style::damp_alpha(envelope, AMBIENT_ALPHA_FACTOR);
            if alpha > 0 {
                let window = schedule.flare_window(Endpoint::Destination);
                visual.markers.push(MarkerVisual {
                    position: AMBIENT_POSITION,
                    kind: MarkerKind::Ambient,
                    alpha,
                    scale: AMBIENT_BASE_SCALE * style::ambient_growth_scale(age, window),
                });
            }
        }
    }

    visual
}

/// Assemble one frame across all active events.
pub fn sample_frame<'a, I>(events: I, now: DateTime<Utc>, schedule: &PhaseSchedule) -> FrameSample
where
    I: IntoIterator<Item = &'a AttackEvent>,
{
    let mut frame = FrameSample::default();
    for event in events {
        let visual = sample_event(event, now, schedule);
        if let Some(arc) = visual.arc {
            frame.arcs.push(arc);
        }
        frame.markers.extend(visual.markers);
    }
    frame
}

/// Push a growing endpoint flare onto the visual if it is visible.
fn push_flare(
    visual: &mut EventVisual,
    position: pulsemap_types::GeoPoint,
    kind: MarkerKind,
    age: u64,
    endpoint: Endpoint,
    schedule: &PhaseSchedule,
    base_scale: f64,
) {
    let alpha = flare_alpha(age, endpoint, schedule);
    if alpha == 0 {
        return;
    }
    let window = schedule.flare_window(endpoint);
    visual.markers.push(MarkerVisual {
        position,
        kind,
        alpha,
        scale: base_scale * style::growth_scale(age, window),
    });
}
