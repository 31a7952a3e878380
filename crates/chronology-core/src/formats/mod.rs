//! # Formats Module
//!
//! Byte-level containers for record batches. Pure transformations only;
//! reading and writing files is done by the app.

mod archive;

#[cfg(feature = "crypto-hash")]
pub use archive::archive_digest;
pub use archive::{ArchiveHeader, MAX_ARCHIVE_PAYLOAD_SIZE, archive_from_bytes, archive_to_bytes};
