//! Data model for roster ingestion: entity kinds, the canonical field schema,
//! typed entities, header mappings, and diagnostics.

mod cell;
mod diagnostic;
mod entity;
mod error;
mod field;
mod kind;
mod mapping;
mod redact;
mod result;

// === Schema ===
pub use field::{Field, FieldType};
pub use kind::EntityKind;

// === Entities ===
pub use cell::CellValue;
pub use entity::{Client, Entity, EntityCollections, FieldValue, Task, Worker};

// === Mapping ===
pub use mapping::{FieldMapping, MatchReason};

// === Diagnostics ===
pub use diagnostic::{ALL_FIELDS, IssueCode, Severity, ValidationError};
pub use result::{BatchSummary, FileFailure, ParsingResult};

// === Logging ===
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};

// === Errors ===
pub use error::{ModelError, Result};
