//! Capped most-recent-first log entry feed.
//!
//! The scrolling log panel shows the newest entries first and forgets
//! the rest; the feed carries no animation state of its own. Producers
//! prepend, the observer reads.

use std::collections::VecDeque;

use pulsemap_types::LogEntry;

/// Bounded list of log entries ordered newest-first.
#[derive(Debug, Clone)]
pub struct LogFeed {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl LogFeed {
    /// Create a feed retaining at most `max_entries` entries.
    ///
    /// A cap of zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Prepend an entry, dropping the oldest beyond the cap.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    /// Iterate entries newest-first.
    pub fn recent(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(summary: &str) -> LogEntry {
        LogEntry::new(
            summary.to_owned(),
            String::from("Simulated"),
            None,
            Utc::now(),
        )
    }

    #[test]
    fn newest_entry_comes_first() {
        let mut feed = LogFeed::new(10);
        feed.push(entry("first"));
        feed.push(entry("second"));

        let summaries: Vec<_> = feed.recent().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["second", "first"]);
    }

    #[test]
    fn cap_drops_oldest_entries() {
        let mut feed = LogFeed::new(3);
        for i in 0..5 {
            feed.push(entry(&format!("entry-{i}")));
        }

        assert_eq!(feed.len(), 3);
        let summaries: Vec<_> = feed.recent().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["entry-4", "entry-3", "entry-2"]);
    }

    #[test]
    fn zero_cap_is_clamped_to_one() {
        let mut feed = LogFeed::new(0);
        feed.push(entry("only"));
        feed.push(entry("newer"));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.recent().next().unwrap().summary, "newer");
    }
}
