//! # Archive Scanning
//!
//! Runs one classification pass over a batch of records on a pool of
//! blocking workers. Every worker classifies a contiguous chunk against the
//! same shared [`RecordClassifier`]; the report is taken after all of them
//! have been joined. The first failing worker raises a shared stop flag and
//! the others stop before their next record.

use chronology_core::primitives::{MIN_RECORD_LEN, TYPE_TOKEN_OFFSET};
use chronology_core::{ChronologyError, RecordClassifier, RecordHandler, RecordKind, RunReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

// =============================================================================
// HANDLER
// =============================================================================

/// Handler used by `scan`: sums payload bytes per kind.
///
/// In strict mode a record whose token is unknown fails the scan.
#[derive(Debug, Default)]
pub struct PayloadTally {
    bytes: [AtomicU64; RecordKind::COUNT],
    strict: bool,
}

impl PayloadTally {
    #[must_use]
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Self::default()
        }
    }

    /// Payload bytes seen per kind, non-zero entries only.
    #[must_use]
    pub fn payload_bytes(&self) -> BTreeMap<RecordKind, u64> {
        RecordKind::ALL
            .into_iter()
            .map(|kind| (kind, self.bytes[kind.index()].load(Ordering::Relaxed)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }
}

impl RecordHandler for PayloadTally {
    type Error = ChronologyError;

    fn handle(&self, kind: RecordKind, record: &[u8]) -> Result<(), ChronologyError> {
        if self.strict && kind == RecordKind::Other {
            let token = record.get(TYPE_TOKEN_OFFSET).copied().unwrap_or_default();
            return Err(ChronologyError::HandlerFailed(format!(
                "unrecognized type token {} in strict mode",
                token
            )));
        }

        let payload = record.len().saturating_sub(MIN_RECORD_LEN) as u64;
        self.bytes[kind.index()].fetch_add(payload, Ordering::Relaxed);
        Ok(())
    }
}

// =============================================================================
// SCAN
// =============================================================================

/// Result of a successful scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub report: RunReport,
    pub workers: usize,
    pub payload_bytes: BTreeMap<RecordKind, u64>,
}

/// Classify one chunk of records until done or until `stop` is raised.
///
/// An error raises `stop` for the other workers. Returns the number of
/// records classified.
pub fn scan_chunk(
    classifier: &RecordClassifier<PayloadTally>,
    records: &[Vec<u8>],
    first_index: u64,
    stop: &AtomicBool,
) -> Result<u64, ChronologyError> {
    let mut classified = 0u64;
    for record in records {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if let Err(e) = classifier.classify(record, first_index.saturating_add(classified)) {
            stop.store(true, Ordering::Relaxed);
            return Err(e);
        }
        classified += 1;
    }
    Ok(classified)
}

/// Classify `records` on `workers` blocking tasks.
///
/// Never spawns more tasks than there are records. Returns the first error
/// any worker hit, after every worker has stopped.
pub async fn scan_records(
    records: Vec<Vec<u8>>,
    name: &str,
    workers: usize,
    strict: bool,
) -> Result<ScanOutcome, ChronologyError> {
    let classifier = Arc::new(RecordClassifier::new(name, PayloadTally::new(strict)));
    let records = Arc::new(records);
    let stop = Arc::new(AtomicBool::new(false));
    let chunk = records.len().div_ceil(workers.max(1)).max(1);

    tracing::debug!(
        "Scan '{}': {} records, {} requested workers ({} per chunk)",
        classifier.name(),
        records.len(),
        workers,
        chunk
    );

    let mut tasks = Vec::with_capacity(records.len().div_ceil(chunk));
    for start in (0..records.len()).step_by(chunk) {
        let classifier = Arc::clone(&classifier);
        let records = Arc::clone(&records);
        let stop = Arc::clone(&stop);
        tasks.push(tokio::task::spawn_blocking(move || {
            let end = (start + chunk).min(records.len());
            scan_chunk(&classifier, &records[start..end], start as u64, &stop)
        }));
    }
    let spawned = tasks.len();

    let mut first_error = None;
    for task in tasks {
        let result = task
            .await
            .map_err(|e| ChronologyError::IoError(format!("Worker task failed: {}", e)))
            .and_then(|r| r);
        match result {
            Ok(n) => tracing::debug!("Worker finished {} records", n),
            Err(e) => {
                tracing::warn!("Worker stopped: {}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    let report = classifier.run_report();
    tracing::info!(
        "Scan '{}' classified {} records",
        report.name,
        report.counts.total
    );

    Ok(ScanOutcome {
        report,
        workers: spawned,
        payload_bytes: classifier.handler().payload_bytes(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
