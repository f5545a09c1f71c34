//! Bounded, validated file reads.

use podready_core::AdmissionError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Maximum size of a configuration file (1 MiB).
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum size of an admission review (3 MiB), matching the usual API
/// server request body limit.
pub const MAX_REVIEW_FILE_SIZE: u64 = 3 * 1024 * 1024;

/// Resolve `path` to a canonical regular file.
///
/// Canonicalization resolves `..` and symlinks before anything is read.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, AdmissionError> {
    let canonical = path.canonicalize().map_err(|e| {
        AdmissionError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(AdmissionError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read a whole file, refusing anything larger than `max_size` bytes.
pub fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>, AdmissionError> {
    let path = validate_file_path(path)?;
    let metadata = std::fs::metadata(&path)
        .map_err(|e| AdmissionError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(AdmissionError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }

    std::fs::read(&path)
        .map_err(|e| AdmissionError::IoError(format!("Cannot read '{}': {}", path.display(), e)))
}

/// Read at most `max_size` bytes from `reader`, failing if there is more.
pub fn read_bounded(reader: impl Read, max_size: u64) -> Result<Vec<u8>, AdmissionError> {
    let mut buf = Vec::new();
    reader
        .take(max_size.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| AdmissionError::IoError(e.to_string()))?;

    if buf.len() as u64 > max_size {
        return Err(AdmissionError::IoError(format!(
            "Input exceeds maximum allowed {} bytes",
            max_size
        )));
    }
    Ok(buf)
}
