use thiserror::Error;

use crate::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),
    #[error("unknown {kind} field: {field}")]
    UnknownField { kind: EntityKind, field: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
