use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("override for {header:?} targets {field}, which is not a {kind} field")]
    ForeignOverride {
        kind: roster_model::EntityKind,
        header: String,
        field: roster_model::Field,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
