//! Roster ingestion pipeline.
//!
//! Each uploaded file goes through extraction, header mapping and
//! transformation on its own; validation runs once every file of the batch
//! has been turned into entities.

mod batch;
mod error;
mod options;
mod pipeline;
mod source;

pub use batch::{BatchInput, BatchOutcome, process_batch, revalidate};
pub use error::{ConfigError, Result};
pub use options::PipelineOptions;
pub use pipeline::{parse_file, parse_table};
pub use source::SourceFile;
