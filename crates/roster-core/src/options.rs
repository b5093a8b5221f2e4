//! Pipeline configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use roster_ingest::{DEFAULT_MAX_BYTES, IngestOptions};
use roster_map::MappingPolicy;
use roster_model::{EntityKind, Field};

use crate::error::{ConfigError, Result};

/// Options shared by every stage of a pipeline run.
///
/// Loadable from TOML; every key is optional:
///
/// ```toml
/// max_file_bytes = 1048576
/// mapping_policy = "accepted-only"
/// parallel = false
///
/// [header_overrides.client]
/// "Cust #" = "ClientID"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Largest accepted upload, in bytes.
    pub max_file_bytes: u64,
    /// Which header proposals feed the transformer.
    pub mapping_policy: MappingPolicy,
    /// Per-kind raw header to canonical field, applied before matching.
    pub header_overrides: BTreeMap<EntityKind, BTreeMap<String, Field>>,
    /// Transform rows and files on the rayon pool.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_BYTES,
            mapping_policy: MappingPolicy::default(),
            header_overrides: BTreeMap::new(),
            parallel: true,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file, rejecting overrides that target another kind.
    pub fn from_toml_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        options.check_overrides()?;
        tracing::debug!(path = %path.display(), "loaded pipeline options");
        Ok(options)
    }

    fn check_overrides(&self) -> Result<()> {
        for (kind, overrides) in &self.header_overrides {
            if let Some((header, field)) = overrides.iter().find(|(_, f)| f.kind() != *kind) {
                return Err(ConfigError::ForeignOverride {
                    kind: *kind,
                    header: header.clone(),
                    field: *field,
                });
            }
        }
        Ok(())
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn with_mapping_policy(mut self, policy: MappingPolicy) -> Self {
        self.mapping_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_header_override(
        mut self,
        kind: EntityKind,
        raw_header: impl Into<String>,
        field: Field,
    ) -> Self {
        self.header_overrides
            .entry(kind)
            .or_default()
            .insert(raw_header.into(), field);
        self
    }

    /// Overrides registered for one kind.
    pub fn overrides_for(&self, kind: EntityKind) -> Vec<(String, Field)> {
        self.header_overrides
            .get(&kind)
            .map(|overrides| overrides.iter().map(|(h, f)| (h.clone(), *f)).collect())
            .unwrap_or_default()
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions::new().with_max_bytes(self.max_file_bytes)
    }
}
