//! # Record Archive Format
//!
//! Binary container for a batch of raw chronology records.
//! File I/O operations are in the app layer.
//!
//! Format: Header (5 bytes) + postcard-serialized list of records.
//! - 4 bytes: Magic ("CHRN")
//! - 1 byte: Version
//!
//! Records are stored verbatim; nothing here looks inside them.
//!
//! ## Limits
//!
//! The payload size is checked against `MAX_ARCHIVE_PAYLOAD_SIZE` and the
//! header is validated before any decoding.

use crate::{ChronologyError, primitives};

/// Maximum accepted archive size.
pub const MAX_ARCHIVE_PAYLOAD_SIZE: usize = 500 * 1024 * 1024; // 500 MB

const HEADER_LEN: usize = 5;

// =============================================================================
// ARCHIVE HEADER
// =============================================================================

/// The header preceding all archive data.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl ArchiveHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::ARCHIVE_MAGIC,
            version: primitives::ARCHIVE_VERSION,
        }
    }

    /// Validate magic and version.
    pub fn validate(&self) -> Result<(), ChronologyError> {
        if &self.magic != primitives::ARCHIVE_MAGIC {
            return Err(ChronologyError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::ARCHIVE_VERSION {
            return Err(ChronologyError::DeserializationError(format!(
                "Unsupported archive version: {} (expected {})",
                self.version,
                primitives::ARCHIVE_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChronologyError> {
        if bytes.len() < HEADER_LEN {
            return Err(ChronologyError::DeserializationError(
                "Archive header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for ArchiveHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize records into an archive (header + payload).
pub fn archive_to_bytes<R: AsRef<[u8]>>(records: &[R]) -> Result<Vec<u8>, ChronologyError> {
    let borrowed: Vec<&[u8]> = records.iter().map(AsRef::as_ref).collect();
    let payload = postcard::to_stdvec(&borrowed)
        .map_err(|e| ChronologyError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + payload.len());
    result.extend_from_slice(&ArchiveHeader::new().to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize the records of an archive.
///
/// Validates, in order:
/// 1. Minimum size (header present)
/// 2. Maximum size
/// 3. Header magic bytes and version
pub fn archive_from_bytes(bytes: &[u8]) -> Result<Vec<Vec<u8>>, ChronologyError> {
    if bytes.len() < HEADER_LEN {
        return Err(ChronologyError::DeserializationError(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > MAX_ARCHIVE_PAYLOAD_SIZE {
        return Err(ChronologyError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_ARCHIVE_PAYLOAD_SIZE
        )));
    }

    let header = ArchiveHeader::from_bytes(bytes)?;
    header.validate()?;

    postcard::from_bytes(&bytes[HEADER_LEN..]).map_err(|e| {
        ChronologyError::DeserializationError(format!("Failed to decode archive records: {}", e))
    })
}

/// Hex BLAKE3 digest of archive bytes.
#[cfg(feature = "crypto-hash")]
#[must_use]
pub fn archive_digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

// =============================================================================
// TESTS
// =============================================================================
