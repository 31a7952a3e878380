//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::resolve_workers;
use crate::scan::scan_records;
use chronology_core::{
    ChronologyError, RecordHeader, archive_digest, archive_from_bytes, archive_to_bytes,
    formats::MAX_ARCHIVE_PAYLOAD_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a single raw record file for `pack` (64 MB).
const MAX_RECORD_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Validate file size before reading.
async fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ChronologyError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ChronologyError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ChronologyError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it
/// names an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ChronologyError> {
    let canonical = path.canonicalize().map_err(|e| {
        ChronologyError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ChronologyError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path: its parent must be an existing directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, ChronologyError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        ChronologyError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(ChronologyError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| ChronologyError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// ARCHIVE I/O
// =============================================================================

/// Read and decode a record archive.
pub async fn load_archive(path: &Path) -> Result<Vec<Vec<u8>>, ChronologyError> {
    let bytes = read_archive_bytes(path).await?;
    archive_from_bytes(&bytes)
}

async fn read_archive_bytes(path: &Path) -> Result<Vec<u8>, ChronologyError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_ARCHIVE_PAYLOAD_SIZE as u64).await?;

    tokio::fs::read(&validated)
        .await
        .map_err(|e| ChronologyError::IoError(format!("Read archive: {}", e)))
}

/// Encode and write a record archive. Returns the number of bytes written.
pub async fn write_archive(path: &Path, records: &[Vec<u8>]) -> Result<usize, ChronologyError> {
    let validated = validate_output_path(path)?;
    let bytes = archive_to_bytes(records)?;

    tokio::fs::write(&validated, &bytes)
        .await
        .map_err(|e| ChronologyError::IoError(format!("Write archive: {}", e)))?;

    Ok(bytes.len())
}

/// Read every regular file of `dir`, sorted by file name, as raw records.
pub async fn pack_directory(dir: &Path) -> Result<Vec<Vec<u8>>, ChronologyError> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        ChronologyError::IoError(format!("Cannot read directory '{}': {}", dir.display(), e))
    })?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ChronologyError::IoError(format!("Read directory entry: {}", e)))?
    {
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut records = Vec::with_capacity(paths.len());
    for path in &paths {
        validate_file_size(path, MAX_RECORD_FILE_SIZE).await?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ChronologyError::IoError(format!("Read '{}': {}", path.display(), e)))?;
        records.push(bytes);
    }

    Ok(records)
}

/// Run name derived from an archive path.
fn run_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "scan".to_string())
}

// =============================================================================
// SCAN COMMAND
// =============================================================================

/// Options of the `scan` command after config and flags are merged.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Requested workers; 0 = one per CPU.
    pub workers: usize,
    pub strict: bool,
    pub name: Option<String>,
}

/// Classify every record of an archive and print the run report.
pub async fn cmd_scan(
    file: &Path,
    options: &ScanOptions,
    json_mode: bool,
) -> Result<(), ChronologyError> {
    let records = load_archive(file).await?;
    let name = options.name.clone().unwrap_or_else(|| run_name_for(file));
    let workers = resolve_workers(options.workers);

    tracing::info!(
        "Scanning {:?}: {} records, {} workers, strict: {}",
        file,
        records.len(),
        workers,
        options.strict
    );

    let outcome = scan_records(records, &name, workers, options.strict).await?;

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", outcome.report);
    if !outcome.payload_bytes.is_empty() {
        println!();
        println!("Payload bytes:");
        for (kind, bytes) in &outcome.payload_bytes {
            println!("  {}: {}", kind.label(), bytes);
        }
    }

    Ok(())
}

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Header summary of one archived record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub index: usize,
    pub len: usize,
    /// `None` when the record is too short to carry a header.
    pub header: Option<RecordHeader>,
}

/// Summarize the first `limit` records.
pub fn summarize_records(records: &[Vec<u8>], limit: usize) -> Vec<RecordSummary> {
    records
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, record)| RecordSummary {
            index,
            len: record.len(),
            header: RecordHeader::parse(record).ok(),
        })
        .collect()
}

/// Show header fields of the first records of an archive.
pub async fn cmd_inspect(
    file: &Path,
    limit: usize,
    json_mode: bool,
) -> Result<(), ChronologyError> {
    let records = load_archive(file).await?;
    let summaries = summarize_records(&records, limit);

    if json_mode {
        let output = serde_json::json!({
            "archive": file.to_string_lossy(),
            "record_count": records.len(),
            "records": summaries,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Archive: {:?}", file);
    println!("Records: {}", records.len());
    println!();
    println!(
        "{:>6}  {:>8}  {:>6}  {:>10}  {:>7}  {:>5}  Kind",
        "Index", "Length", "Arrays", "First len", "Version", "Token"
    );
    for summary in &summaries {
        match &summary.header {
            Some(h) => println!(
                "{:>6}  {:>8}  {:>6}  {:>10}  {:>7}  {:>5}  {}",
                summary.index,
                summary.len,
                h.array_count,
                h.first_array_len,
                h.version,
                h.token,
                h.kind()
            ),
            None => println!(
                "{:>6}  {:>8}  (malformed: shorter than header)",
                summary.index, summary.len
            ),
        }
    }

    Ok(())
}

// =============================================================================
// PACK COMMAND
// =============================================================================

/// Pack a directory of raw record files into an archive.
pub async fn cmd_pack(
    input: &Path,
    output: &Path,
    json_mode: bool,
) -> Result<(), ChronologyError> {
    tracing::info!("Packing {:?} into {:?}", input, output);

    let records = pack_directory(input).await?;
    let written = write_archive(output, &records).await?;

    if json_mode {
        let summary = serde_json::json!({
            "archive": output.to_string_lossy(),
            "record_count": records.len(),
            "bytes": written,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Packed {} records ({} bytes) into {:?}",
        records.len(),
        written,
        output
    );
    Ok(())
}

// =============================================================================
// HASH COMMAND
// =============================================================================

/// Compute the BLAKE3 digest of an archive.
///
/// The archive is decoded first so only well-formed archives get a digest.
pub async fn cmd_hash(file: &Path, json_mode: bool) -> Result<(), ChronologyError> {
    let bytes = read_archive_bytes(file).await?;
    let records = archive_from_bytes(&bytes)?;
    let digest = archive_digest(&bytes);

    if json_mode {
        let output = serde_json::json!({
            "archive": file.to_string_lossy(),
            "record_count": records.len(),
            "blake3": digest,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("BLAKE3: {}", digest);
    println!("Records: {}", records.len());
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
