//! Error types for raw table extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal extraction errors. Any of these rejects the whole file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Input Errors ===
    /// The byte buffer is empty.
    #[error("file is empty")]
    Empty,

    /// The byte buffer exceeds the configured limit.
    #[error("file is {size} bytes, limit is {max_size} bytes")]
    TooLarge { size: u64, max_size: u64 },

    /// The declared extension is not a supported container.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Failed to read file from disk.
    #[error("failed to read file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Content Errors ===
    /// The workbook contains no worksheets.
    #[error("workbook has no sheets")]
    NoSheets,

    /// The first worksheet has no rows.
    #[error("sheet '{sheet}' has no rows")]
    EmptySheet { sheet: String },

    /// No non-blank header row was found.
    #[error("no header row found")]
    NoHeader,

    // === Decoder Errors ===
    /// Delimited text could not be parsed.
    #[error("failed to parse delimited text: {message}")]
    Csv { message: String },

    /// The spreadsheet container could not be opened or read.
    #[error("failed to read workbook: {message}")]
    Workbook { message: String },
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, IngestError>;
