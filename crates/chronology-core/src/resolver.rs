//! # Type Resolver
//!
//! Maps the type token of a record header to a [`RecordKind`].
//!
//! Total over all 256 byte values: anything outside the known mapping is
//! `Other`. Classification never fails on the token itself.

use crate::RecordKind;
use crate::primitives::{
    CONCEPT_CHRONOLOGY_TOKEN, PATTERN_CHRONOLOGY_TOKEN, SEMANTIC_CHRONOLOGY_TOKEN, STAMP_TOKEN,
};

/// Stateless token → kind resolver.
pub struct TypeResolver;

impl TypeResolver {
    /// Resolve a type token.
    #[must_use]
    pub const fn resolve(token: u8) -> RecordKind {
        match token {
            CONCEPT_CHRONOLOGY_TOKEN => RecordKind::Concept,
            SEMANTIC_CHRONOLOGY_TOKEN => RecordKind::Semantic,
            PATTERN_CHRONOLOGY_TOKEN => RecordKind::Pattern,
            STAMP_TOKEN => RecordKind::Stamp,
            _ => RecordKind::Other,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
