//! # History Ledger
//!
//! Append-only record of economic events.
//!
//! Entries are immutable once appended and are stored newest-first, which is
//! the order every listing surface consumes them in. Sequence numbers come
//! from an atomic counter, so they are unique and monotonically increasing
//! for the lifetime of the session even when appends race.
//!
//! There is no eviction; a bounded demo session cannot grow the ledger far
//! enough to matter. Listing surfaces that want a cap use [`Ledger::recent`].

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Category of a recorded economic event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Coin recharge purchase.
    Recharge,
    /// SVIP tier purchase.
    Svip,
    /// Room join.
    Room,
    /// Reward wheel spin.
    Wheel,
    /// Withdrawal request.
    Withdraw,
    /// Privileged administrator action.
    Admin,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recharge => write!(f, "Recharge"),
            Self::Svip => write!(f, "SVIP"),
            Self::Room => write!(f, "Room"),
            Self::Wheel => write!(f, "Wheel"),
            Self::Withdraw => write!(f, "Withdraw"),
            Self::Admin => write!(f, "Admin"),
        }
    }
}

/// A single immutable ledger entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Event category.
    pub kind: EntryKind,
    /// Human-readable description of the event.
    pub text: String,
    /// Wall-clock time of the event in epoch milliseconds.
    pub at_ms: u64,
}

/// Append-only, newest-first event ledger.
pub struct Ledger {
    /// Entries, newest at the front.
    entries: Mutex<VecDeque<HistoryEntry>>,
    /// Next sequence number to assign.
    next_seq: AtomicU64,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Appends an entry and returns its sequence number. O(1).
    pub fn append(&self, kind: EntryKind, text: impl Into<String>, at_ms: u64) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let entry = HistoryEntry {
            seq,
            kind,
            text: text.into(),
            at_ms,
        };
        tracing::debug!(seq, kind = %entry.kind, text = %entry.text, "ledger append");
        self.entries.lock().push_front(entry);
        seq
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copies out all entries, newest first.
    #[must_use]
    pub fn newest_first(&self) -> Vec<HistoryEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Copies out at most `limit` entries, newest first.
    ///
    /// Append semantics are unaffected; this only caps retrieval.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.lock().iter().take(limit).cloned().collect()
    }

    /// The most recently appended entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<HistoryEntry> {
        self.entries.lock().front().cloned()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_is_newest_first() {
        let ledger = Ledger::new();
        ledger.append(EntryKind::Recharge, "+50 coins", 1_000);
        ledger.append(EntryKind::Wheel, "Won 20 coins", 2_000);

        let entries = ledger.newest_first();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Wheel);
        assert_eq!(entries[1].kind, EntryKind::Recharge);
    }

    #[test]
    fn test_sequence_numbers_are_monotonic() {
        let ledger = Ledger::new();
        let a = ledger.append(EntryKind::Room, "Joined room r1", 1_000);
        let b = ledger.append(EntryKind::Room, "Joined room r2", 1_000);
        let c = ledger.append(EntryKind::Admin, "Admin granted SVIP 2", 1_001);

        assert!(a < b && b < c);
    }

    #[test]
    fn test_latest_tracks_most_recent_append() {
        let ledger = Ledger::new();
        assert!(ledger.latest().is_none());

        ledger.append(EntryKind::Withdraw, "Requested -50 coins", 5_000);
        let latest = ledger.latest().unwrap();
        assert_eq!(latest.kind, EntryKind::Withdraw);
        assert_eq!(latest.at_ms, 5_000);
    }

    #[test]
    fn test_recent_caps_retrieval_only() {
        let ledger = Ledger::new();
        for i in 0..10 {
            ledger.append(EntryKind::Room, format!("Joined room r{i}"), 1_000 + i);
        }

        let capped = ledger.recent(3);
        assert_eq!(capped.len(), 3);
        assert_eq!(capped[0].text, "Joined room r9");
        assert_eq!(ledger.len(), 10);
    }
}
