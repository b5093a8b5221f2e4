//! The three entity kinds handled by the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Entity kind; one uploaded file carries exactly one kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Client,
    Worker,
    Task,
}

impl EntityKind {
    /// All kinds in ingestion order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Client, EntityKind::Worker, EntityKind::Task];

    /// Letter every identifier of this kind is expected to start with.
    pub fn id_prefix(&self) -> char {
        match self {
            EntityKind::Client => 'C',
            EntityKind::Worker => 'W',
            EntityKind::Task => 'T',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Worker => "worker",
            EntityKind::Task => "task",
        }
    }

    /// Plural label used in summaries.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Client => "clients",
            EntityKind::Worker => "workers",
            EntityKind::Task => "tasks",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    /// Accepts singular or plural, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" | "clients" => Ok(EntityKind::Client),
            "worker" | "workers" => Ok(EntityKind::Worker),
            "task" | "tasks" => Ok(EntityKind::Task),
            _ => Err(ModelError::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural() {
        assert_eq!("Clients".parse::<EntityKind>().unwrap(), EntityKind::Client);
        assert_eq!(" worker ".parse::<EntityKind>().unwrap(), EntityKind::Worker);
        assert_eq!("TASKS".parse::<EntityKind>().unwrap(), EntityKind::Task);
        assert!("projects".parse::<EntityKind>().is_err());
    }

    #[test]
    fn prefixes_are_distinct() {
        assert_eq!(EntityKind::Client.id_prefix(), 'C');
        assert_eq!(EntityKind::Worker.id_prefix(), 'W');
        assert_eq!(EntityKind::Task.id_prefix(), 'T');
    }
}
