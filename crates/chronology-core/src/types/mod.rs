//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the classifier:
//! - Record kinds (`RecordKind`)
//! - The per-record handler seam (`RecordHandler`)
//! - Error types (`ChronologyError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` so report order never depends on arrival order

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// RECORD KIND
// =============================================================================

/// The closed set of chronology kinds a record can be classified as.
///
/// Variant order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A concept chronology.
    Concept,
    /// A semantic chronology.
    Semantic,
    /// A pattern chronology.
    Pattern,
    /// A stamp (provenance / versioning) record.
    Stamp,
    /// Any token outside the known mapping.
    Other,
}

impl RecordKind {
    /// Every kind, in report order.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Concept,
        RecordKind::Semantic,
        RecordKind::Pattern,
        RecordKind::Stamp,
        RecordKind::Other,
    ];

    /// Number of kinds (size of the counter array).
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index of this kind, matching its position in [`RecordKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            RecordKind::Concept => 0,
            RecordKind::Semantic => 1,
            RecordKind::Pattern => 2,
            RecordKind::Stamp => 3,
            RecordKind::Other => 4,
        }
    }

    /// Plural label used in report lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RecordKind::Concept => "Concepts",
            RecordKind::Semantic => "Semantics",
            RecordKind::Pattern => "Patterns",
            RecordKind::Stamp => "Stamps",
            RecordKind::Other => "Others",
        }
    }

    /// The wire token for this kind, or `None` for [`RecordKind::Other`].
    #[must_use]
    pub const fn token(self) -> Option<u8> {
        use crate::primitives::{
            CONCEPT_CHRONOLOGY_TOKEN, PATTERN_CHRONOLOGY_TOKEN, SEMANTIC_CHRONOLOGY_TOKEN,
            STAMP_TOKEN,
        };

        match self {
            RecordKind::Concept => Some(CONCEPT_CHRONOLOGY_TOKEN),
            RecordKind::Semantic => Some(SEMANTIC_CHRONOLOGY_TOKEN),
            RecordKind::Pattern => Some(PATTERN_CHRONOLOGY_TOKEN),
            RecordKind::Stamp => Some(STAMP_TOKEN),
            RecordKind::Other => None,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

// =============================================================================
// HANDLER TRAIT
// =============================================================================

/// Per-record processing hook supplied by the user of the classifier.
///
/// Called synchronously from inside `RecordClassifier::classify`, after the
/// record has been counted. Handlers are shared by every producer thread,
/// so they must be `Send + Sync`.
///
/// # Errors
///
/// `Error` is also the error type of `classify`. It must be constructible
/// from [`ChronologyError`] so a malformed record can be reported through
/// the same channel, while handler failures come back untouched.
///
/// # Extension Point
///
/// Closures of the shape `Fn(RecordKind, &[u8]) -> Result<(), E>` implement
/// this trait directly.
pub trait RecordHandler: Send + Sync {
    /// Error raised by the handler.
    type Error: From<ChronologyError>;

    /// Process one classified record.
    fn handle(&self, kind: RecordKind, record: &[u8]) -> Result<(), Self::Error>;
}

impl<F, E> RecordHandler for F
where
    F: Fn(RecordKind, &[u8]) -> Result<(), E> + Send + Sync,
    E: From<ChronologyError>,
{
    type Error = E;

    fn handle(&self, kind: RecordKind, record: &[u8]) -> Result<(), E> {
        self(kind, record)
    }
}

/// A handler that accepts every record and does nothing.
///
/// Useful when only the counters and the timing are of interest.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountOnly;

impl RecordHandler for CountOnly {
    type Error = ChronologyError;

    fn handle(&self, _kind: RecordKind, _record: &[u8]) -> Result<(), ChronologyError> {
        Ok(())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while classifying records or handling archives.
///
/// - No silent failures
/// - Unknown type tokens are NOT an error (they classify as `Other`)
/// - Nothing in the core panics; every failure is returned
#[derive(Debug, Error)]
pub enum ChronologyError {
    /// The record is too short to contain the type token.
    #[error("Malformed record: {len} bytes, at least {required} required")]
    MalformedRecord { len: usize, required: usize },

    /// A record handler rejected a record.
    #[error("Handler failed: {0}")]
    HandlerFailed(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A configuration value is missing or invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// TESTS
// =============================================================================
