//! Raw table extraction for roster uploads.
//!
//! Decodes a byte buffer (delimited text or a spreadsheet workbook) into a
//! header row and string records. No schema knowledge lives here; every cell
//! leaves this crate as a string.
//!
//! # Example
//!
//! ```ignore
//! use roster_ingest::{IngestOptions, extract};
//!
//! let table = extract(b"ClientID,ClientName\nC1,Acme\n", Some("csv"), &IngestOptions::default())?;
//! assert_eq!(table.headers, vec!["ClientID", "ClientName"]);
//! ```

mod delimited;
mod error;
mod extract;
mod format;
mod table;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Extraction ===
pub use extract::{DEFAULT_MAX_BYTES, IngestOptions, extract, extract_path};
pub use format::FileFormat;
pub use table::{RawRecord, RawTable};

// === Text Decoding ===
pub use delimited::{decode_text, sniff_delimiter};
