use thiserror::Error;

use roster_model::{EntityKind, Field};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("header '{0}' is not part of this mapping")]
    UnknownHeader(String),
    #[error("{field} is not a {kind} field")]
    WrongKind { field: Field, kind: EntityKind },
}

pub type Result<T> = std::result::Result<T, MapError>;
