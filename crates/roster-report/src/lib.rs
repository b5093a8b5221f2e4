//! Diagnostics aggregation and export for roster batches.

mod error;
mod export;
mod report;

pub use error::{ExportError, Result};
pub use export::{export_csv, export_csv_to_writer, export_header};
pub use report::{DiagnosticsReport, FileSection};
