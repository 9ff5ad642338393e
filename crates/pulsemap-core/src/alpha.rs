//! Pure age-to-opacity evaluation.
//!
//! [`alpha_for_lifecycle`] is the single function every visible element
//! runs through: given an event's age and a phase window it returns the
//! element's opacity in `[0, 255]`. The cases are evaluated in strict
//! order -- not yet begun, fully expired, ramping in, holding, ramping
//! out -- and zero-length fade durations are guarded explicitly so a
//! degenerate configuration steps instead of dividing by zero.

use crate::easing::ease;
use crate::schedule::{Endpoint, PhaseSchedule, PhaseWindow};

/// Fully opaque alpha value.
pub const ALPHA_OPAQUE: u8 = 255;

/// Opacity of an element at the given age, in `[0, 255]`.
pub fn alpha_for_lifecycle(age_ms: u64, window: &PhaseWindow) -> u8 {
    // 1. Not yet begun.
    if age_ms < window.fade_in_start {
        return 0;
    }
    // 2. Fully expired. Also covers a zero-length fade-out, which jumps
    //    straight to invisible at its start time.
    if age_ms >= window.fade_out_end() {
        return 0;
    }
    // 3. Ramping in. A zero-length fade-in skips the ramp: the element
    //    is already opaque at its start time.
    if window.fade_in_duration > 0 && age_ms < window.fade_in_end() {
        let progress = offset_progress(age_ms, window.fade_in_start, window.fade_in_duration);
        return scale_alpha(ease(progress));
    }
    // 4. Holding.
    if age_ms < window.fade_out_start {
        return ALPHA_OPAQUE;
    }
    // 5. Ramping out. The duration cannot be zero here (case 2 caught
    //    that), but the guard keeps the division total regardless.
    if window.fade_out_duration == 0 {
        return 0;
    }
    let progress = offset_progress(age_ms, window.fade_out_start, window.fade_out_duration);
    scale_alpha(1.0 - ease(progress))
}

/// Opacity of the arc at the given age.
pub fn arc_alpha(age_ms: u64, schedule: &PhaseSchedule) -> u8 {
    alpha_for_lifecycle(age_ms, &schedule.arc)
}

/// Opacity of the given endpoint flare at the given age.
pub fn flare_alpha(age_ms: u64, endpoint: Endpoint, schedule: &PhaseSchedule) -> u8 {
    alpha_for_lifecycle(age_ms, schedule.flare_window(endpoint))
}

/// Fractional progress of `age_ms` through a phase starting at `start`
/// and lasting `duration` milliseconds. Callers guarantee `duration > 0`
/// and `age_ms >= start`.
fn offset_progress(age_ms: u64, start: u64, duration: u64) -> f64 {
    let elapsed = age_ms.saturating_sub(start);
    elapsed as f64 / duration as f64
}

/// Map a `[0, 1]` opacity level onto the `[0, 255]` alpha range.
fn scale_alpha(level: f64) -> u8 {
    (255.0 * level).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::AnimationConfig;

    fn default_schedule() -> PhaseSchedule {
        PhaseSchedule::from_config(&AnimationConfig::default())
    }

    #[test]
    fn invisible_before_fade_in() {
        let schedule = default_schedule();
        // Arc fade-in starts at 100.
        assert_eq!(arc_alpha(0, &schedule), 0);
        assert_eq!(arc_alpha(99, &schedule), 0);
    }

    #[test]
    fn invisible_at_and_after_fade_out_end() {
        let schedule = default_schedule();
        let end = schedule.arc.fade_out_end();
        assert_eq!(arc_alpha(end, &schedule), 0);
        assert_eq!(arc_alpha(end.saturating_add(10_000), &schedule), 0);
    }

    #[test]
    fn arc_midpoint_is_half_opacity() {
        // Arc window [100, 900]: at age 500 progress is 0.5 and the
        // symmetric ease curve yields exactly 255 * 0.5 rounded up.
        let schedule = default_schedule();
        assert_eq!(arc_alpha(500, &schedule), 128);
    }

    #[test]
    fn arc_holds_fully_visible() {
        let schedule = default_schedule();
        assert_eq!(arc_alpha(905, &schedule), 255);
        assert_eq!(arc_alpha(4499, &schedule), 255);
    }

    #[test]
    fn arc_expires_at_end_of_fade_out() {
        let schedule = default_schedule();
        // Arc fade-out runs [4500, 4900]; gone from 4900 onwards.
        assert!(arc_alpha(4600, &schedule) > 0);
        assert_eq!(arc_alpha(4900, &schedule), 0);
        assert_eq!(arc_alpha(5300, &schedule), 0);
    }

    #[test]
    fn ramp_up_is_monotone_non_decreasing() {
        let schedule = default_schedule();
        let window = schedule.arc;
        let mut previous = 0;
        for age in window.fade_in_start..=window.fade_in_end() {
            let alpha = alpha_for_lifecycle(age, &window);
            assert!(alpha >= previous, "ramp-up regressed at age {age}");
            previous = alpha;
        }
        assert_eq!(previous, 255);
    }

    #[test]
    fn ramp_down_is_monotone_non_increasing() {
        let schedule = default_schedule();
        let window = schedule.arc;
        let mut previous = 255;
        for age in window.fade_out_start..=window.fade_out_end() {
            let alpha = alpha_for_lifecycle(age, &window);
            assert!(alpha <= previous, "ramp-down rose at age {age}");
            previous = alpha;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn zero_fade_in_jumps_to_opaque() {
        let window = PhaseWindow {
            fade_in_start: 200,
            fade_in_duration: 0,
            fade_out_start: 1000,
            fade_out_duration: 400,
        };
        assert_eq!(alpha_for_lifecycle(199, &window), 0);
        assert_eq!(alpha_for_lifecycle(200, &window), 255);
        assert_eq!(alpha_for_lifecycle(999, &window), 255);
    }

    #[test]
    fn zero_fade_out_jumps_to_invisible() {
        let window = PhaseWindow {
            fade_in_start: 0,
            fade_in_duration: 100,
            fade_out_start: 1000,
            fade_out_duration: 0,
        };
        assert_eq!(alpha_for_lifecycle(999, &window), 255);
        assert_eq!(alpha_for_lifecycle(1000, &window), 0);
        assert_eq!(alpha_for_lifecycle(1001, &window), 0);
    }

    #[test]
    fn fully_degenerate_window_never_panics() {
        let window = PhaseWindow {
            fade_in_start: 0,
            fade_in_duration: 0,
            fade_out_start: 0,
            fade_out_duration: 0,
        };
        // Expired immediately at age 0: fade_out_end() == 0.
        assert_eq!(alpha_for_lifecycle(0, &window), 0);
        assert_eq!(alpha_for_lifecycle(1, &window), 0);
    }

    #[test]
    fn source_flare_leads_destination_flare() {
        let schedule = default_schedule();
        // At age 200 the source flare is mid-ramp but the destination
        // flare (window [500, 900]) has not begun.
        assert!(flare_alpha(200, Endpoint::Source, &schedule) > 0);
        assert_eq!(flare_alpha(200, Endpoint::Destination, &schedule), 0);
        // At age 700 both are visible.
        assert!(flare_alpha(700, Endpoint::Source, &schedule) > 0);
        assert!(flare_alpha(700, Endpoint::Destination, &schedule) > 0);
    }

    #[test]
    fn destination_flare_midpoint() {
        // Destination window [500, 900]: midpoint at age 700.
        let schedule = default_schedule();
        assert_eq!(flare_alpha(700, Endpoint::Destination, &schedule), 128);
    }
}
