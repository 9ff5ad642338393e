//! Attack events and log entries.
//!
//! An [`AttackEvent`] is one visualized occurrence: a source, a target,
//! and a creation timestamp. It is immutable after creation and owned
//! exclusively by the engine's event store; every visual property is
//! derived from its age, never stored back onto it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geo::GeoPoint;
use crate::ids::{EventId, LogEntryId};

/// One visualized attack occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AttackEvent {
    /// Unique event identifier, minted at ingestion.
    pub id: EventId,
    /// Where the attack originates. The `(0, 0)` sentinel means unknown.
    pub source: GeoPoint,
    /// Where the attack lands. The `(0, 0)` sentinel means unknown.
    pub target: GeoPoint,
    /// When the event entered the engine. Ages are measured from here.
    pub created_at: DateTime<Utc>,
}

impl AttackEvent {
    /// Create a new event stamped with the given creation time.
    pub fn new(source: GeoPoint, target: GeoPoint, created_at: DateTime<Utc>) -> Self {
        Self {
            id: EventId::new(),
            source,
            target,
            created_at,
        }
    }

    /// Elapsed whole milliseconds since creation.
    ///
    /// Clock skew that would make the event appear to come from the
    /// future clamps to age 0 rather than going negative.
    pub fn age_ms(&self, now: DateTime<Utc>) -> u64 {
        let millis = (now - self.created_at).num_milliseconds();
        u64::try_from(millis).unwrap_or(0)
    }
}

/// A human-readable entry in the scrolling event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Unique log entry identifier.
    pub id: LogEntryId,
    /// One-line summary shown in the log panel.
    pub summary: String,
    /// Name of the feed or generator that produced the event.
    pub source: String,
    /// Attack classification, when the feed provided one.
    pub attack: Option<String>,
    /// When the underlying event was observed.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create a new log entry.
    pub fn new(
        summary: String,
        source: String,
        attack: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LogEntryId::new(),
            summary,
            source,
            attack,
            timestamp,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn age_counts_milliseconds() {
        let t0 = Utc::now();
        let event = AttackEvent::new(GeoPoint::new(2.2, 48.8), GeoPoint::new(139.7, 35.7), t0);
        let now = t0 + TimeDelta::milliseconds(450);
        assert_eq!(event.age_ms(now), 450);
    }

    #[test]
    fn age_clamps_future_events_to_zero() {
        let t0 = Utc::now();
        let event = AttackEvent::new(GeoPoint::ORIGIN, GeoPoint::ORIGIN, t0);
        let earlier = t0 - TimeDelta::milliseconds(100);
        assert_eq!(event.age_ms(earlier), 0);
    }
}
