//! Extraction entry points.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::delimited::read_delimited;
use crate::error::{IngestError, Result};
use crate::format::FileFormat;
use crate::table::RawTable;
use crate::workbook::read_workbook;

/// Default upload limit (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Extraction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Largest accepted buffer, in bytes.
    pub max_bytes: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

/// Decode a byte buffer into headers and raw records.
///
/// `declared_extension` takes precedence; without one the container is
/// sniffed from its magic bytes. On failure nothing partial is returned.
pub fn extract(
    bytes: &[u8],
    declared_extension: Option<&str>,
    options: &IngestOptions,
) -> Result<RawTable> {
    let started = Instant::now();

    if bytes.is_empty() {
        return Err(IngestError::Empty);
    }
    let size = bytes.len() as u64;
    if size > options.max_bytes {
        return Err(IngestError::TooLarge {
            size,
            max_size: options.max_bytes,
        });
    }

    let format = match declared_extension {
        Some(extension) => FileFormat::from_extension(extension)?,
        None => FileFormat::sniff(bytes),
    };

    let _span = tracing::debug_span!("extract", format = %format, bytes = size).entered();
    let table = if format.is_workbook() {
        read_workbook(bytes, format)?
    } else {
        read_delimited(bytes)?
    };

    tracing::debug!(
        columns = table.headers.len(),
        rows = table.row_count(),
        duration_ms = started.elapsed().as_millis() as u64,
        "extracted table"
    );
    Ok(table)
}

/// Read a file from disk and extract it, using its extension when present.
pub fn extract_path(path: &Path, options: &IngestOptions) -> Result<RawTable> {
    let metadata = std::fs::metadata(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.len() > options.max_bytes {
        return Err(IngestError::TooLarge {
            size: metadata.len(),
            max_size: options.max_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    extract(&bytes, extension, options)
}
