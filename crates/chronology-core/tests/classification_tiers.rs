//! # Classification Tier Tests (T0-T3)
//!
//! If ANY tier fails, the classifier is INVALID.
//!
//! ## Tiers
//! - T0: Record Integrity
//! - T1: Kind Resolution & Counting
//! - T2: Concurrent Producers
//! - T3: Run Report

use chronology_core::primitives::{
    CONCEPT_CHRONOLOGY_TOKEN, ENTITY_FORMAT_VERSION, PATTERN_CHRONOLOGY_TOKEN,
    SEMANTIC_CHRONOLOGY_TOKEN, STAMP_TOKEN,
};
use chronology_core::{
    ChronologyError, CountOnly, CounterSnapshot, RecordClassifier, RecordKind, build_record,
};

fn record(token: u8) -> Vec<u8> {
    build_record(token, ENTITY_FORMAT_VERSION, b"\x00\x01payload")
}

fn record_of(kind: RecordKind) -> Vec<u8> {
    record(kind.token().unwrap_or(0xEE))
}

// =============================================================================
// TIER T0: RECORD INTEGRITY
// =============================================================================

mod t0_record_integrity {
    use super::*;

    /// T0.1: Every length below the header is rejected.
    #[test]
    fn short_records_rejected() {
        let classifier = RecordClassifier::new("t0", CountOnly);

        for len in 0..10 {
            let result = classifier.classify(&vec![CONCEPT_CHRONOLOGY_TOKEN; len], len as u64);
            assert!(
                matches!(result, Err(ChronologyError::MalformedRecord { .. })),
                "length {} must be rejected",
                len
            );
        }
        assert_eq!(classifier.snapshot(), CounterSnapshot::default());
    }

    /// T0.2: A header-only record is accepted.
    #[test]
    fn header_only_accepted() {
        let classifier = RecordClassifier::new("t0", CountOnly);
        let bare = build_record(STAMP_TOKEN, 0, &[]);

        assert_eq!(
            classifier.classify(&bare, 0).expect("classify"),
            RecordKind::Stamp
        );
    }

    /// T0.3: A failed record does not disturb previous counts.
    #[test]
    fn malformed_leaves_counters_unchanged() {
        let classifier = RecordClassifier::new("t0", CountOnly);
        classifier.classify(&record(PATTERN_CHRONOLOGY_TOKEN), 0).expect("ok");
        let before = classifier.snapshot();

        let _ = classifier.classify(&[9u8; 5], 1);

        assert_eq!(classifier.snapshot(), before);
    }
}

// =============================================================================
// TIER T1: KIND RESOLUTION & COUNTING
// =============================================================================

mod t1_counting {
    use super::*;

    /// T1.1: A known token bumps exactly its kind and the total.
    #[test]
    fn known_kind_counts_once() {
        for kind in RecordKind::ALL {
            let classifier = RecordClassifier::new("t1", CountOnly);
            classifier.classify(&record_of(kind), 0).expect("classify");

            let snap = classifier.snapshot();
            assert_eq!(snap.total, 1);
            for other in RecordKind::ALL {
                let expected = u64::from(other == kind);
                assert_eq!(snap.count(other), expected, "{} after {}", other, kind);
            }
        }
    }

    /// T1.2: Unrecognized tokens are counted as Other.
    #[test]
    fn unknown_tokens_are_other() {
        let classifier = RecordClassifier::new("t1", CountOnly);
        for token in [0u8, 4, 5, 6, 8, 42, 255] {
            classifier.classify(&record(token), 0).expect("classify");
        }

        let snap = classifier.snapshot();
        assert_eq!(snap.others, 7);
        assert_eq!(snap.total, 7);
    }

    /// T1.3: Only byte 9 decides; the rest of the header is ignored.
    #[test]
    fn only_token_byte_matters() {
        let classifier = RecordClassifier::new("t1", CountOnly);
        let mut bytes = vec![0xFFu8; 16];
        bytes[9] = SEMANTIC_CHRONOLOGY_TOKEN;

        assert_eq!(
            classifier.classify(&bytes, 0).expect("classify"),
            RecordKind::Semantic
        );
    }

    /// T1.4: The sequence index drives no behavior.
    #[test]
    fn sequence_index_ignored() {
        let a = RecordClassifier::new("t1", CountOnly);
        let b = RecordClassifier::new("t1", CountOnly);
        for (i, token) in [1u8, 2, 3, 7, 9].into_iter().enumerate() {
            a.classify(&record(token), i as u64).expect("a");
            b.classify(&record(token), u64::MAX - i as u64).expect("b");
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

// =============================================================================
// TIER T2: CONCURRENT PRODUCERS
// =============================================================================

mod t2_concurrency {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// T2.1: N producers x M records are all counted.
    #[test]
    fn parallel_producers_lose_nothing() {
        const PRODUCERS: usize = 8;
        const PER_PRODUCER: usize = 2_500;

        let classifier = RecordClassifier::new("t2", CountOnly);

        std::thread::scope(|s| {
            for p in 0..PRODUCERS {
                let classifier = &classifier;
                s.spawn(move || {
                    for i in 0..PER_PRODUCER {
                        let kind = RecordKind::ALL[(p + i) % RecordKind::COUNT];
                        let index = (p * PER_PRODUCER + i) as u64;
                        classifier
                            .classify(&record_of(kind), index)
                            .expect("classify");
                    }
                });
            }
        });

        let snap = classifier.snapshot();
        assert_eq!(snap.total, (PRODUCERS * PER_PRODUCER) as u64);
        assert_eq!(snap.kind_sum(), snap.total);
        // 20_000 records spread evenly across 5 kinds.
        for kind in RecordKind::ALL {
            assert_eq!(snap.count(kind), 4_000);
        }
    }

    /// T2.2: The handler is invoked once per counted record.
    #[test]
    fn handler_runs_once_per_record() {
        let seen = AtomicU64::new(0);
        let classifier = RecordClassifier::new("t2", |_: RecordKind, _: &[u8]| {
            seen.fetch_add(1, Ordering::Relaxed);
            Ok::<(), ChronologyError>(())
        });

        std::thread::scope(|s| {
            for _ in 0..4 {
                let classifier = &classifier;
                s.spawn(move || {
                    for _ in 0..500 {
                        classifier.classify(&record(STAMP_TOKEN), 0).expect("ok");
                    }
                });
            }
        });

        assert_eq!(seen.load(Ordering::Relaxed), 2_000);
        assert_eq!(classifier.snapshot().stamps, 2_000);
    }
}

// =============================================================================
// TIER T3: RUN REPORT
// =============================================================================

mod t3_report {
    use super::*;

    /// T3.1: Concept, Concept, Stamp.
    #[test]
    fn report_example() {
        let classifier = RecordClassifier::new("ExampleRun", CountOnly);
        for token in [
            CONCEPT_CHRONOLOGY_TOKEN,
            CONCEPT_CHRONOLOGY_TOKEN,
            STAMP_TOKEN,
        ] {
            classifier.classify(&record(token), 0).expect("classify");
        }

        let report = classifier.report();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Finished: ExampleRun");
        assert!(lines[1].starts_with("Duration: "));
        assert!(lines[2].starts_with("Average realization time: "));
        assert_eq!(&lines[3..], &["Concepts: 2", "Stamps: 1", "Total: 3"]);
    }

    /// T3.2: No records, no kind lines, zero average.
    #[test]
    fn empty_report() {
        let classifier = RecordClassifier::new("Empty", CountOnly);
        let report = classifier.run_report();

        assert_eq!(report.counts.total, 0);
        assert_eq!(report.average_nanos, 0);
        let text = report.to_string();
        for kind in RecordKind::ALL {
            assert!(!text.contains(kind.label()));
        }
        assert!(text.ends_with("Total: 0"));
    }

    /// T3.3: Kind order does not depend on arrival order.
    #[test]
    fn kind_lines_in_fixed_order() {
        let classifier = RecordClassifier::new("order", CountOnly);
        for kind in [
            RecordKind::Other,
            RecordKind::Stamp,
            RecordKind::Pattern,
            RecordKind::Semantic,
            RecordKind::Concept,
        ] {
            classifier.classify(&record_of(kind), 0).expect("classify");
        }

        let report = classifier.report();
        let labels: Vec<&str> = report
            .lines()
            .skip(3)
            .filter_map(|line| line.split(':').next())
            .collect();
        assert_eq!(
            labels,
            vec!["Concepts", "Semantics", "Patterns", "Stamps", "Others", "Total"]
        );
    }

    /// T3.4: Reporting twice is harmless.
    #[test]
    fn report_twice() {
        let classifier = RecordClassifier::new("twice", CountOnly);
        classifier.classify(&record(1), 0).expect("classify");

        let first = classifier.report();
        let second = classifier.report();
        assert_eq!(first, second);
    }
}
