//! # Counter Bank
//!
//! Per-kind and total record counters shared by every producer of a run.
//!
//! Increments are plain atomic adds: no lock is taken on the
//! classification path. A [`CounterSnapshot`] taken while producers are
//! still running may be stale; take it after they have joined.

use crate::RecordKind;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters, one per [`RecordKind`] plus a total.
#[derive(Debug, Default)]
pub struct CounterBank {
    kinds: [AtomicU64; RecordKind::COUNT],
    total: AtomicU64,
}

impl CounterBank {
    /// Create a bank with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record of `kind`.
    ///
    /// Bumps the kind counter and the total. The two adds are separate
    /// atomics; they agree once every caller has returned.
    pub fn increment(&self, kind: RecordKind) {
        self.kinds[kind.index()].fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Current count for one kind.
    #[must_use]
    pub fn count(&self, kind: RecordKind) -> u64 {
        self.kinds[kind.index()].load(Ordering::Relaxed)
    }

    /// Current total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    /// Point-in-time read of all counters.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            concepts: self.count(RecordKind::Concept),
            semantics: self.count(RecordKind::Semantic),
            patterns: self.count(RecordKind::Pattern),
            stamps: self.count(RecordKind::Stamp),
            others: self.count(RecordKind::Other),
            total: self.total(),
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Plain copy of a [`CounterBank`] at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub concepts: u64,
    pub semantics: u64,
    pub patterns: u64,
    pub stamps: u64,
    pub others: u64,
    pub total: u64,
}

impl CounterSnapshot {
    /// Count for one kind.
    #[must_use]
    pub fn count(&self, kind: RecordKind) -> u64 {
        match kind {
            RecordKind::Concept => self.concepts,
            RecordKind::Semantic => self.semantics,
            RecordKind::Pattern => self.patterns,
            RecordKind::Stamp => self.stamps,
            RecordKind::Other => self.others,
        }
    }

    /// Sum of the per-kind counts (saturating).
    #[must_use]
    pub fn kind_sum(&self) -> u64 {
        RecordKind::ALL
            .iter()
            .fold(0u64, |acc, &kind| acc.saturating_add(self.count(kind)))
    }

    /// Kinds with a non-zero count, in report order.
    pub fn nonzero(&self) -> impl Iterator<Item = (RecordKind, u64)> + '_ {
        RecordKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.count(kind)))
            .filter(|&(_, n)| n > 0)
    }

    /// True when no record has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bank_is_zero() {
        let bank = CounterBank::new();
        let snap = bank.snapshot();
        assert!(snap.is_empty());
        assert_eq!(snap, CounterSnapshot::default());
    }

    #[test]
    fn increment_touches_one_kind_and_total() {
        let bank = CounterBank::new();
        bank.increment(RecordKind::Pattern);

        let snap = bank.snapshot();
        assert_eq!(snap.patterns, 1);
        assert_eq!(snap.total, 1);
        for kind in RecordKind::ALL {
            if kind != RecordKind::Pattern {
                assert_eq!(snap.count(kind), 0);
            }
        }
    }

    #[test]
    fn total_equals_kind_sum() {
        let bank = CounterBank::new();
        for kind in [
            RecordKind::Concept,
            RecordKind::Concept,
            RecordKind::Stamp,
            RecordKind::Other,
        ] {
            bank.increment(kind);
        }
        let snap = bank.snapshot();
        assert_eq!(snap.total, 4);
        assert_eq!(snap.kind_sum(), snap.total);
    }

    #[test]
    fn nonzero_skips_empty_kinds_in_order() {
        let bank = CounterBank::new();
        bank.increment(RecordKind::Stamp);
        bank.increment(RecordKind::Concept);

        let seen: Vec<_> = bank.snapshot().nonzero().collect();
        assert_eq!(
            seen,
            vec![(RecordKind::Concept, 1), (RecordKind::Stamp, 1)]
        );
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let bank = CounterBank::new();

        std::thread::scope(|s| {
            for t in 0..8 {
                let bank = &bank;
                s.spawn(move || {
                    let kind = RecordKind::ALL[t % RecordKind::COUNT];
                    for _ in 0..1000 {
                        bank.increment(kind);
                    }
                });
            }
        });

        let snap = bank.snapshot();
        assert_eq!(snap.total, 8000);
        assert_eq!(snap.kind_sum(), 8000);
        // Threads 0 and 5 both counted concepts.
        assert_eq!(snap.concepts, 2000);
    }
}
