//! Phase timing schedule for the event lifecycle.
//!
//! Every event animates through the same three sub-elements -- source
//! flare, arc, destination flare -- each with its own fade-in window, a
//! shared hold, and a staggered fade-out. The schedule is derived once
//! at process start from [`AnimationConfig`] and passed by reference
//! into the evaluators; nothing is recomputed per event.
//!
//! # Invariants
//!
//! - For every element, `fade_out_start >= fade_in_end`.
//! - The destination flare's fade-in ends exactly when the arc's fade-in
//!   ends, so the visual "impact" moment is synchronized. This holds for
//!   any configuration: when the flare duration exceeds the arc window
//!   the start saturates at zero and the duration stretches instead.
//! - `total_lifecycle_ms` is the fade-out end of whichever element
//!   finishes last, and is the sole input to store pruning.

use crate::config::AnimationConfig;

/// One sub-element's timing: absolute millisecond offsets from event
/// creation for its fade-in and fade-out phases. The hold phase is the
/// gap between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseWindow {
    /// When the fade-in begins.
    pub fade_in_start: u64,
    /// How long the fade-in lasts. Zero collapses the ramp to a jump.
    pub fade_in_duration: u64,
    /// When the fade-out begins.
    pub fade_out_start: u64,
    /// How long the fade-out lasts. Zero collapses the ramp to a jump.
    pub fade_out_duration: u64,
}

impl PhaseWindow {
    /// When the fade-in completes.
    pub const fn fade_in_end(&self) -> u64 {
        self.fade_in_start.saturating_add(self.fade_in_duration)
    }

    /// When the fade-out completes and the element is fully gone.
    pub const fn fade_out_end(&self) -> u64 {
        self.fade_out_start.saturating_add(self.fade_out_duration)
    }
}

/// Which endpoint flare a caller is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The flare at the attack's origin.
    Source,
    /// The flare at the attack's target.
    Destination,
}

/// The process-wide phase timing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSchedule {
    /// Timing for the source flare.
    pub source: PhaseWindow,
    /// Timing for the arc.
    pub arc: PhaseWindow,
    /// Timing for the destination flare.
    pub destination: PhaseWindow,
    /// Age at which an event is fully faded and eligible for pruning.
    pub total_lifecycle_ms: u64,
}

impl PhaseSchedule {
    /// Derive the schedule from the configured durations.
    ///
    /// The source flare fades in first, the arc starts after a short
    /// delay, and the destination flare is timed backwards from the
    /// arc's fade-in end. All three share a hold that begins when the
    /// last fade-in completes; fade-outs start together after the hold,
    /// offset by each element's fade-in start so the same stagger
    /// order is preserved on the way out.
    pub fn from_config(config: &AnimationConfig) -> Self {
        let flare_in = config.initial_flare_fade_in_ms;
        let fade_out = config.element_fade_out_ms;

        let source_in_start = 0_u64;
        let arc_in_start = config.arc_start_delay_ms;
        let arc_in_end = arc_in_start.saturating_add(config.arc_fade_in_ms);

        // The destination flare must finish appearing in lock-step with
        // the arc: its start is back-computed and saturates at zero.
        let dest_in_start = arc_in_end.saturating_sub(flare_in);
        let dest_in_duration = arc_in_end.saturating_sub(dest_in_start);

        let source_in_end = source_in_start.saturating_add(flare_in);
        let hold_start = source_in_end.max(arc_in_end);
        let fade_out_phase_start = hold_start.saturating_add(config.hold_ms);

        let source = PhaseWindow {
            fade_in_start: source_in_start,
            fade_in_duration: flare_in,
            fade_out_start: fade_out_phase_start,
            fade_out_duration: fade_out,
        };
        let arc = PhaseWindow {
            fade_in_start: arc_in_start,
            fade_in_duration: config.arc_fade_in_ms,
            fade_out_start: fade_out_phase_start.saturating_add(arc_in_start),
            fade_out_duration: fade_out,
        };
        let destination = PhaseWindow {
            fade_in_start: dest_in_start,
            fade_in_duration: dest_in_duration,
            fade_out_start: fade_out_phase_start.saturating_add(dest_in_start),
            fade_out_duration: fade_out,
        };

        let total_lifecycle_ms = source
            .fade_out_end()
            .max(arc.fade_out_end())
            .max(destination.fade_out_end());

        Self {
            source,
            arc,
            destination,
            total_lifecycle_ms,
        }
    }

    /// The flare window for the given endpoint.
    pub const fn flare_window(&self, endpoint: Endpoint) -> &PhaseWindow {
        match endpoint {
            Endpoint::Source => &self.source,
            Endpoint::Destination => &self.destination,
        }
    }
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}
