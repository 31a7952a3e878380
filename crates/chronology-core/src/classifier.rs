//! # Record Classifier
//!
//! The orchestrator of a classification run.
//!
//! For each record:
//! 1. Read the type token at the fixed header offset (short records fail)
//! 2. Resolve the kind
//! 3. Count it
//! 4. Hand it to the injected [`RecordHandler`]
//!
//! One classifier serves one run. It is shared by reference across all
//! producer threads; `finish()` and `report()` belong after they join.

use crate::counters::{CounterBank, CounterSnapshot};
use crate::header::type_token;
use crate::resolver::TypeResolver;
use crate::stopwatch::{Stopwatch, average, format_duration};
use crate::{RecordHandler, RecordKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classifies records, counts them per kind and times the run.
#[derive(Debug)]
pub struct RecordClassifier<H> {
    name: String,
    handler: H,
    counters: CounterBank,
    stopwatch: Stopwatch,
}

impl<H: RecordHandler> RecordClassifier<H> {
    /// Create a classifier for a run named `name`. The stopwatch starts now.
    pub fn new(name: impl Into<String>, handler: H) -> Self {
        Self {
            name: name.into(),
            handler,
            counters: CounterBank::new(),
            stopwatch: Stopwatch::new(),
        }
    }

    /// Classify one record.
    ///
    /// `sequence_index` is the producer's position for this record; it is
    /// accepted for call-site compatibility and not interpreted.
    ///
    /// # Errors
    ///
    /// - `ChronologyError::MalformedRecord` (converted into `H::Error`) when
    ///   the record is shorter than the header. Nothing is counted.
    /// - Whatever the handler returns, unchanged. The record has already
    ///   been counted at that point.
    pub fn classify(&self, record: &[u8], _sequence_index: u64) -> Result<RecordKind, H::Error> {
        let token = type_token(record)?;
        let kind = TypeResolver::resolve(token);
        self.counters.increment(kind);
        self.handler.handle(kind, record)?;
        Ok(kind)
    }

    /// Classify a contiguous batch whose first record has index `first_index`.
    ///
    /// Stops at the first error. Returns the number of records classified.
    pub fn classify_batch<R: AsRef<[u8]>>(
        &self,
        records: &[R],
        first_index: u64,
    ) -> Result<u64, H::Error> {
        let mut classified = 0u64;
        for record in records {
            self.classify(record.as_ref(), first_index.saturating_add(classified))?;
            classified += 1;
        }
        Ok(classified)
    }

    /// Stop the run stopwatch. Idempotent.
    pub fn finish(&self) -> Duration {
        self.stopwatch.stop()
    }

    /// Current counters.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        self.counters.snapshot()
    }

    /// Finish the run and collect its figures.
    pub fn run_report(&self) -> RunReport {
        let elapsed = self.finish();
        let counts = self.snapshot();
        RunReport {
            name: self.name.clone(),
            elapsed_nanos: saturating_nanos(elapsed),
            average_nanos: saturating_nanos(average(elapsed, counts.total)),
            counts,
        }
    }

    /// Finish the run and render the human-readable summary.
    pub fn report(&self) -> String {
        self.run_report().to_string()
    }

    /// The run name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The injected handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

// =============================================================================
// RUN REPORT
// =============================================================================

/// Figures of a finished run.
///
/// `Display` renders the summary printed by `RecordClassifier::report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Run name.
    pub name: String,
    /// Wall-clock duration of the run in nanoseconds.
    pub elapsed_nanos: u64,
    /// Duration per record in nanoseconds (0 when nothing was counted).
    pub average_nanos: u64,
    /// Counters at finish time.
    pub counts: CounterSnapshot,
}

impl RunReport {
    /// Run duration.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos)
    }

    /// Average duration per record.
    #[must_use]
    pub fn average(&self) -> Duration {
        Duration::from_nanos(self.average_nanos)
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Finished: {}", self.name)?;
        writeln!(f, "Duration: {}", format_duration(self.elapsed()))?;
        writeln!(
            f,
            "Average realization time: {}",
            format_duration(self.average())
        )?;
        for (kind, count) in self.counts.nonzero() {
            writeln!(f, "{}: {}", kind.label(), count)?;
        }
        write!(f, "Total: {}", self.counts.total)
    }
}

// =============================================================================
// TESTS
// =============================================================================
