//! Serde model of the feed payload.
//!
//! The collaborator's poll endpoint returns
//! `{ "logs": [[event, arc, summary], ...] }`: each record is a
//! three-element array of an event object, an arc object (or null),
//! and a pre-rendered summary string. Coordinates arrive as
//! `[lon, lat]` pairs; `[0, 0]` means "unknown". Anything missing
//! degrades to the sentinel -- conversion never fails.

use chrono::{DateTime, Utc};
use pulsemap_types::{AttackEvent, GeoPoint, LogEntry};
use serde::Deserialize;

/// Top-level poll response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    /// Records accumulated since the last poll.
    #[serde(default)]
    pub logs: Vec<FeedRecord>,
}

/// One feed record: `[event, arc, summary]`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRecord(pub FeedEvent, pub Option<FeedArc>, pub String);

impl FeedRecord {
    /// The event metadata.
    pub const fn event(&self) -> &FeedEvent {
        &self.0
    }

    /// The arc coordinates, when the collaborator could resolve any.
    pub const fn arc(&self) -> Option<&FeedArc> {
        self.1.as_ref()
    }

    /// The human-readable summary.
    pub fn summary(&self) -> &str {
        &self.2
    }
}

/// Event metadata attached to a feed record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedEvent {
    /// Name of the upstream feed that observed the event.
    #[serde(default)]
    pub source: String,

    /// Attack classification. Upstream feeds disagree on the field
    /// name, so the common aliases are accepted.
    #[serde(default, alias = "abuse_attack", alias = "otx_name")]
    pub attack: Option<String>,

    /// When the event was observed upstream.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Arc coordinates attached to a feed record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedArc {
    /// Attacker position as `[lon, lat]`, `[0, 0]` when unknown.
    #[serde(default)]
    pub src: Option<[f64; 2]>,

    /// Victim position as `[lon, lat]`.
    #[serde(default)]
    pub dst: Option<[f64; 2]>,
}

/// A feed record converted into engine inputs.
#[derive(Debug, Clone)]
pub struct IngestedRecord {
    /// The event to animate.
    pub event: AttackEvent,
    /// The log entry to show in the panel.
    pub log: LogEntry,
}

/// Convert a feed record into an event and a log entry, stamped with
/// `now` as the creation time.
///
/// Coordinate rules, in order:
/// - missing arc or missing fields substitute the `(0, 0)` sentinel;
/// - a sentinel source with a real destination becomes a
///   self-referencing event at the destination (the "unknown source"
///   contract);
/// - a record with no resolvable coordinate at all still becomes an
///   event -- it renders as the ambient fallback marker.
pub fn convert_record(record: &FeedRecord, now: DateTime<Utc>) -> IngestedRecord {
    let (src, dst) = match record.arc() {
        Some(arc) => (
            arc.src.map_or(GeoPoint::ORIGIN, GeoPoint::from),
            arc.dst.map_or(GeoPoint::ORIGIN, GeoPoint::from),
        ),
        None => (GeoPoint::ORIGIN, GeoPoint::ORIGIN),
    };

    let (src, dst) = if src.is_origin() && !dst.is_origin() {
        (dst, dst)
    } else {
        (src, dst)
    };

    let event = AttackEvent::new(src, dst, now);
    let meta = record.event();
    let log = LogEntry::new(
        record.summary().to_owned(),
        meta.source.clone(),
        meta.attack.clone(),
        meta.timestamp.unwrap_or(now),
    );

    IngestedRecord { event, log }
}
