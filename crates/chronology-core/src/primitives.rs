//! # Wire Primitives
//!
//! Fixed constants describing the serialized chronology record layout
//! and the archive container. Compiled in, immutable at runtime.
//!
//! ## Record Header
//!
//! | bytes | field                         |
//! |-------|-------------------------------|
//! | 0..4  | array count (i32, big-endian) |
//! | 4..8  | first array length (i32, BE)  |
//! | 8     | entity format version         |
//! | 9     | type token                    |
//! | 10..  | payload                       |

/// Offset of the big-endian array count.
pub const ARRAY_COUNT_OFFSET: usize = 0;

/// Offset of the big-endian length of the first array.
pub const FIRST_ARRAY_LEN_OFFSET: usize = 4;

/// Offset of the entity format version byte.
pub const FORMAT_VERSION_OFFSET: usize = 8;

/// Offset of the type token read by the classifier.
pub const TYPE_TOKEN_OFFSET: usize = 9;

/// Smallest record that still carries a type token.
pub const MIN_RECORD_LEN: usize = TYPE_TOKEN_OFFSET + 1;

// =============================================================================
// TYPE TOKENS
// =============================================================================

/// Field data type token of a concept chronology.
pub const CONCEPT_CHRONOLOGY_TOKEN: u8 = 1;

/// Field data type token of a pattern chronology.
pub const PATTERN_CHRONOLOGY_TOKEN: u8 = 2;

/// Field data type token of a semantic chronology.
pub const SEMANTIC_CHRONOLOGY_TOKEN: u8 = 3;

/// Field data type token of a stamp.
pub const STAMP_TOKEN: u8 = 7;

/// Entity format version written by [`crate::header::build_record`].
pub const ENTITY_FORMAT_VERSION: u8 = 1;

// =============================================================================
// ARCHIVE CONTAINER
// =============================================================================

/// Magic bytes for the record archive header.
///
/// - Archive = Magic Bytes ("CHRN") + Version (u8) before payload.
pub const ARCHIVE_MAGIC: &[u8; 4] = b"CHRN";

/// Current archive format version.
///
/// Increment this when making breaking changes to the archive layout.
pub const ARCHIVE_VERSION: u8 = 1;
