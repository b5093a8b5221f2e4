//! Row-level failures. These never escape the crate as errors; each becomes a
//! single whole-row diagnostic and the row is dropped.

use thiserror::Error;

use roster_model::{EntityKind, Field};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A scalar field received several values.
    #[error("{field} expects a single value but received {count}")]
    UnexpectedList { field: Field, count: usize },

    /// The row carries a field of another entity kind.
    #[error("{field} is not a {kind} field")]
    ForeignField { field: Field, kind: EntityKind },
}
