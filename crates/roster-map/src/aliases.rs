//! Recognized header aliases per entity kind.
//!
//! This table is part of the schema contract: consumers that persist mappings
//! should record [`ALIAS_TABLE_VERSION`] alongside them.

use roster_model::{EntityKind, Field};

/// Bumped whenever an alias is added, removed, or retargeted.
pub const ALIAS_TABLE_VERSION: u32 = 1;

const CLIENT_ALIASES: &[(&str, Field)] = &[
    ("ClientID", Field::ClientId),
    ("ClientName", Field::ClientName),
    ("PriorityLevel", Field::PriorityLevel),
    ("RequestedTaskIDs", Field::RequestedTaskIds),
    ("GroupTag", Field::GroupTag),
    ("AttributesJSON", Field::AttributesJson),
    ("client_id", Field::ClientId),
    ("Client ID", Field::ClientId),
    ("ID", Field::ClientId),
    ("client_name", Field::ClientName),
    ("Client Name", Field::ClientName),
    ("Name", Field::ClientName),
    ("priority_level", Field::PriorityLevel),
    ("Priority Level", Field::PriorityLevel),
    ("Priority", Field::PriorityLevel),
    ("requested_task_ids", Field::RequestedTaskIds),
    ("Requested Task IDs", Field::RequestedTaskIds),
    ("Requested Tasks", Field::RequestedTaskIds),
    ("Tasks", Field::RequestedTaskIds),
    ("group_tag", Field::GroupTag),
    ("Group Tag", Field::GroupTag),
    ("Group", Field::GroupTag),
    ("attributes_json", Field::AttributesJson),
    ("Attributes", Field::AttributesJson),
    ("Metadata", Field::AttributesJson),
];

const WORKER_ALIASES: &[(&str, Field)] = &[
    ("WorkerID", Field::WorkerId),
    ("WorkerName", Field::WorkerName),
    ("Skills", Field::Skills),
    ("AvailableSlots", Field::AvailableSlots),
    ("MaxLoadPerPhase", Field::MaxLoadPerPhase),
    ("WorkerGroup", Field::WorkerGroup),
    ("QualificationLevel", Field::QualificationLevel),
    ("worker_id", Field::WorkerId),
    ("Worker ID", Field::WorkerId),
    ("ID", Field::WorkerId),
    ("worker_name", Field::WorkerName),
    ("Worker Name", Field::WorkerName),
    ("Name", Field::WorkerName),
    ("skills", Field::Skills),
    ("Skill Set", Field::Skills),
    ("available_slots", Field::AvailableSlots),
    ("Available Slots", Field::AvailableSlots),
    ("Slots", Field::AvailableSlots),
    ("max_load_per_phase", Field::MaxLoadPerPhase),
    ("Max Load Per Phase", Field::MaxLoadPerPhase),
    ("Max Load", Field::MaxLoadPerPhase),
    ("worker_group", Field::WorkerGroup),
    ("Worker Group", Field::WorkerGroup),
    ("Group", Field::WorkerGroup),
    ("qualification_level", Field::QualificationLevel),
    ("Qualification Level", Field::QualificationLevel),
    ("Qualification", Field::QualificationLevel),
];

const TASK_ALIASES: &[(&str, Field)] = &[
    ("TaskID", Field::TaskId),
    ("TaskName", Field::TaskName),
    ("Category", Field::Category),
    ("Duration", Field::Duration),
    ("RequiredSkills", Field::RequiredSkills),
    ("PreferredPhases", Field::PreferredPhases),
    ("MaxConcurrent", Field::MaxConcurrent),
    ("task_id", Field::TaskId),
    ("Task ID", Field::TaskId),
    ("ID", Field::TaskId),
    ("task_name", Field::TaskName),
    ("Task Name", Field::TaskName),
    ("Name", Field::TaskName),
    ("category", Field::Category),
    ("Type", Field::Category),
    ("duration", Field::Duration),
    ("Phases Needed", Field::Duration),
    ("required_skills", Field::RequiredSkills),
    ("Required Skills", Field::RequiredSkills),
    ("Skills", Field::RequiredSkills),
    ("preferred_phases", Field::PreferredPhases),
    ("Preferred Phases", Field::PreferredPhases),
    ("Phases", Field::PreferredPhases),
    ("max_concurrent", Field::MaxConcurrent),
    ("Max Concurrent", Field::MaxConcurrent),
    ("Concurrency", Field::MaxConcurrent),
];

/// Alias keys of a kind, canonical names first.
pub fn aliases(kind: EntityKind) -> &'static [(&'static str, Field)] {
    match kind {
        EntityKind::Client => CLIENT_ALIASES,
        EntityKind::Worker => WORKER_ALIASES,
        EntityKind::Task => TASK_ALIASES,
    }
}

/// Alias keys that resolve to one field.
pub fn aliases_for(field: Field) -> impl Iterator<Item = &'static str> {
    aliases(field.kind())
        .iter()
        .filter(move |(_, target)| *target == field)
        .map(|(alias, _)| *alias)
}
