//! # Record Header
//!
//! Read-only view over the fixed ten-byte header of a chronology record,
//! and a builder for well-formed records.
//!
//! The classifier only needs byte 9; the other fields are exposed for
//! inspection tools.

use crate::primitives::{
    ARRAY_COUNT_OFFSET, FIRST_ARRAY_LEN_OFFSET, FORMAT_VERSION_OFFSET, MIN_RECORD_LEN,
    TYPE_TOKEN_OFFSET,
};
use crate::resolver::TypeResolver;
use crate::{ChronologyError, RecordKind};
use serde::{Deserialize, Serialize};

/// Decoded record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    /// Number of arrays in the record.
    pub array_count: u32,
    /// Length of the first array.
    pub first_array_len: u32,
    /// Entity format version.
    pub version: u8,
    /// Raw type token.
    pub token: u8,
}

impl RecordHeader {
    /// Parse the header of `record`.
    ///
    /// Returns `ChronologyError::MalformedRecord` when the record is shorter
    /// than the header.
    pub fn parse(record: &[u8]) -> Result<Self, ChronologyError> {
        let header = record
            .get(..MIN_RECORD_LEN)
            .ok_or(ChronologyError::MalformedRecord {
                len: record.len(),
                required: MIN_RECORD_LEN,
            })?;

        Ok(Self {
            array_count: read_u32(header, ARRAY_COUNT_OFFSET),
            first_array_len: read_u32(header, FIRST_ARRAY_LEN_OFFSET),
            version: header[FORMAT_VERSION_OFFSET],
            token: header[TYPE_TOKEN_OFFSET],
        })
    }

    /// Kind resolved from the type token.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        TypeResolver::resolve(self.token)
    }
}

/// Read the type token of a record.
pub fn type_token(record: &[u8]) -> Result<u8, ChronologyError> {
    record
        .get(TYPE_TOKEN_OFFSET)
        .copied()
        .ok_or(ChronologyError::MalformedRecord {
            len: record.len(),
            required: MIN_RECORD_LEN,
        })
}

fn read_u32(header: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&header[offset..offset + 4]);
    u32::from_be_bytes(bytes)
}

/// Build a single-array record with the given token, version and payload.
///
/// The first array spans the version byte, the token and the payload.
#[must_use]
pub fn build_record(token: u8, version: u8, payload: &[u8]) -> Vec<u8> {
    let first_array_len = (payload.len() + 2) as u32;

    let mut record = Vec::with_capacity(MIN_RECORD_LEN + payload.len());
    record.extend_from_slice(&1u32.to_be_bytes());
    record.extend_from_slice(&first_array_len.to_be_bytes());
    record.push(version);
    record.push(token);
    record.extend_from_slice(payload);
    record
}

// =============================================================================
// TESTS
// =============================================================================
