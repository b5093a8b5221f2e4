//! Canonical field schema for each entity kind.
//!
//! This table is the schema contract shared by header mapping, transformation,
//! validation, and export. Field names are unique across kinds, so a bare
//! name is enough to recover both the field and its kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ModelError, Result};
use crate::kind::EntityKind;

/// Value shape of a canonical field, with inclusive bounds for numeric shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Unique identifier, trimmed text.
    Id,
    /// Free text, trimmed.
    Text,
    /// Integer clamped into `[min, max]`.
    Int { min: i64, max: i64 },
    /// Integer list whose out-of-range entries are dropped.
    IntList { min: i64, max: i64 },
    /// List of trimmed, non-empty strings.
    TextList,
    /// Opaque JSON-encoded text.
    Json,
}

impl FieldType {
    /// Inclusive bounds for numeric shapes.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        match self {
            FieldType::Int { min, max } | FieldType::IntList { min, max } => Some((*min, *max)),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldType::IntList { .. } | FieldType::TextList)
    }
}

/// A canonical field of one of the three entity kinds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Field {
    #[serde(rename = "ClientID")]
    ClientId,
    ClientName,
    PriorityLevel,
    #[serde(rename = "RequestedTaskIDs")]
    RequestedTaskIds,
    GroupTag,
    #[serde(rename = "AttributesJSON")]
    AttributesJson,

    #[serde(rename = "WorkerID")]
    WorkerId,
    WorkerName,
    Skills,
    AvailableSlots,
    MaxLoadPerPhase,
    WorkerGroup,
    QualificationLevel,

    #[serde(rename = "TaskID")]
    TaskId,
    TaskName,
    Category,
    Duration,
    RequiredSkills,
    PreferredPhases,
    MaxConcurrent,
}

const CLIENT_FIELDS: &[Field] = &[
    Field::ClientId,
    Field::ClientName,
    Field::PriorityLevel,
    Field::RequestedTaskIds,
    Field::GroupTag,
    Field::AttributesJson,
];

const WORKER_FIELDS: &[Field] = &[
    Field::WorkerId,
    Field::WorkerName,
    Field::Skills,
    Field::AvailableSlots,
    Field::MaxLoadPerPhase,
    Field::WorkerGroup,
    Field::QualificationLevel,
];

const TASK_FIELDS: &[Field] = &[
    Field::TaskId,
    Field::TaskName,
    Field::Category,
    Field::Duration,
    Field::RequiredSkills,
    Field::PreferredPhases,
    Field::MaxConcurrent,
];

impl Field {
    /// Canonical fields of a kind, in export order.
    pub fn for_kind(kind: EntityKind) -> &'static [Field] {
        match kind {
            EntityKind::Client => CLIENT_FIELDS,
            EntityKind::Worker => WORKER_FIELDS,
            EntityKind::Task => TASK_FIELDS,
        }
    }

    /// Canonical name as it appears in headers and exports.
    pub fn name(&self) -> &'static str {
        match self {
            Field::ClientId => "ClientID",
            Field::ClientName => "ClientName",
            Field::PriorityLevel => "PriorityLevel",
            Field::RequestedTaskIds => "RequestedTaskIDs",
            Field::GroupTag => "GroupTag",
            Field::AttributesJson => "AttributesJSON",
            Field::WorkerId => "WorkerID",
            Field::WorkerName => "WorkerName",
            Field::Skills => "Skills",
            Field::AvailableSlots => "AvailableSlots",
            Field::MaxLoadPerPhase => "MaxLoadPerPhase",
            Field::WorkerGroup => "WorkerGroup",
            Field::QualificationLevel => "QualificationLevel",
            Field::TaskId => "TaskID",
            Field::TaskName => "TaskName",
            Field::Category => "Category",
            Field::Duration => "Duration",
            Field::RequiredSkills => "RequiredSkills",
            Field::PreferredPhases => "PreferredPhases",
            Field::MaxConcurrent => "MaxConcurrent",
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Field::ClientId
            | Field::ClientName
            | Field::PriorityLevel
            | Field::RequestedTaskIds
            | Field::GroupTag
            | Field::AttributesJson => EntityKind::Client,
            Field::WorkerId
            | Field::WorkerName
            | Field::Skills
            | Field::AvailableSlots
            | Field::MaxLoadPerPhase
            | Field::WorkerGroup
            | Field::QualificationLevel => EntityKind::Worker,
            Field::TaskId
            | Field::TaskName
            | Field::Category
            | Field::Duration
            | Field::RequiredSkills
            | Field::PreferredPhases
            | Field::MaxConcurrent => EntityKind::Task,
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Field::ClientId | Field::WorkerId | Field::TaskId => FieldType::Id,
            Field::ClientName
            | Field::GroupTag
            | Field::WorkerName
            | Field::WorkerGroup
            | Field::TaskName
            | Field::Category => FieldType::Text,
            Field::PriorityLevel | Field::QualificationLevel => FieldType::Int { min: 1, max: 5 },
            Field::MaxLoadPerPhase | Field::Duration => FieldType::Int { min: 1, max: 10 },
            Field::MaxConcurrent => FieldType::Int { min: 1, max: 5 },
            Field::AvailableSlots | Field::PreferredPhases => FieldType::IntList { min: 1, max: 20 },
            Field::RequestedTaskIds | Field::Skills | Field::RequiredSkills => FieldType::TextList,
            Field::AttributesJson => FieldType::Json,
        }
    }

    /// The identifier field of a kind.
    pub fn id_field(kind: EntityKind) -> Field {
        match kind {
            EntityKind::Client => Field::ClientId,
            EntityKind::Worker => Field::WorkerId,
            EntityKind::Task => Field::TaskId,
        }
    }

    /// Fields a file must provide a column for (identifier and name).
    pub fn required(kind: EntityKind) -> [Field; 2] {
        match kind {
            EntityKind::Client => [Field::ClientId, Field::ClientName],
            EntityKind::Worker => [Field::WorkerId, Field::WorkerName],
            EntityKind::Task => [Field::TaskId, Field::TaskName],
        }
    }

    /// Look up a field by exact canonical name within a kind.
    pub fn from_name(kind: EntityKind, name: &str) -> Result<Field> {
        Field::for_kind(kind)
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| ModelError::UnknownField {
                kind,
                field: name.to_string(),
            })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_belongs_to_its_kind_table() {
        for kind in EntityKind::ALL {
            for field in Field::for_kind(kind) {
                assert_eq!(field.kind(), kind, "{field} listed under {kind}");
            }
        }
    }

    #[test]
    fn names_round_trip_through_lookup() {
        for kind in EntityKind::ALL {
            for field in Field::for_kind(kind) {
                assert_eq!(Field::from_name(kind, field.name()).unwrap(), *field);
            }
        }
        assert!(Field::from_name(EntityKind::Client, "WorkerID").is_err());
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Field::RequestedTaskIds).unwrap();
        assert_eq!(json, "\"RequestedTaskIDs\"");
        let field: Field = serde_json::from_str("\"AttributesJSON\"").unwrap();
        assert_eq!(field, Field::AttributesJson);
    }

    #[test]
    fn declared_bounds() {
        assert_eq!(Field::PriorityLevel.field_type().bounds(), Some((1, 5)));
        assert_eq!(Field::AvailableSlots.field_type().bounds(), Some((1, 20)));
        assert_eq!(Field::Duration.field_type().bounds(), Some((1, 10)));
        assert!(Field::Skills.field_type().is_list());
        assert_eq!(Field::ClientName.field_type().bounds(), None);
    }
}
