//! # chronology-core
//!
//! Streaming classifier for serialized knowledge-graph chronology
//! records - THE LOGIC.
//!
//! Each raw record carries a type token at a fixed header offset. The
//! [`RecordClassifier`] reads it, resolves a [`RecordKind`], counts the
//! record in a lock-free [`CounterBank`], passes it to a caller-supplied
//! [`RecordHandler`] and, at the end of the run, renders a summary.
//!
//! ## Architectural Constraints
//!
//! - Synchronous: `classify` never blocks or suspends
//! - Safe to share: any number of producer threads may classify at once
//! - Per-run state only: no globals, one classifier per run
//! - Has NO async, NO network, NO file I/O (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod classifier;
pub mod counters;
pub mod formats;
pub mod header;
pub mod primitives;
pub mod resolver;
pub mod stopwatch;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ChronologyError, CountOnly, RecordHandler, RecordKind};

// =============================================================================
// RE-EXPORTS: Classification
// =============================================================================

pub use classifier::{RecordClassifier, RunReport};
pub use counters::{CounterBank, CounterSnapshot};
pub use header::{RecordHeader, build_record, type_token};
pub use resolver::TypeResolver;
pub use stopwatch::{Stopwatch, format_duration};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

#[cfg(feature = "crypto-hash")]
pub use formats::archive_digest;
pub use formats::{ArchiveHeader, archive_from_bytes, archive_to_bytes};
