//! Typed entity records produced by the transformer.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::kind::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "ClientID")]
    pub client_id: String,
    #[serde(rename = "ClientName")]
    pub client_name: String,
    #[serde(rename = "PriorityLevel")]
    pub priority_level: i64,
    #[serde(rename = "RequestedTaskIDs")]
    pub requested_task_ids: Vec<String>,
    #[serde(rename = "GroupTag")]
    pub group_tag: String,
    #[serde(rename = "AttributesJSON")]
    pub attributes_json: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    #[serde(rename = "WorkerID")]
    pub worker_id: String,
    #[serde(rename = "WorkerName")]
    pub worker_name: String,
    #[serde(rename = "Skills")]
    pub skills: Vec<String>,
    #[serde(rename = "AvailableSlots")]
    pub available_slots: Vec<i64>,
    #[serde(rename = "MaxLoadPerPhase")]
    pub max_load_per_phase: i64,
    #[serde(rename = "WorkerGroup")]
    pub worker_group: String,
    #[serde(rename = "QualificationLevel")]
    pub qualification_level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "TaskID")]
    pub task_id: String,
    #[serde(rename = "TaskName")]
    pub task_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Duration")]
    pub duration: i64,
    #[serde(rename = "RequiredSkills")]
    pub required_skills: Vec<String>,
    #[serde(rename = "PreferredPhases")]
    pub preferred_phases: Vec<i64>,
    #[serde(rename = "MaxConcurrent")]
    pub max_concurrent: i64,
}

/// One entity of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Client(Client),
    Worker(Worker),
    Task(Task),
}

/// A typed field value, used when walking entities generically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    IntList(Vec<i64>),
    TextList(Vec<String>),
}

impl FieldValue {
    /// Flat text form: lists are comma-joined.
    pub fn to_cell_string(&self) -> String {
        match self {
            FieldValue::Text(value) => value.clone(),
            FieldValue::Int(value) => value.to_string(),
            FieldValue::IntList(values) => values
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(","),
            FieldValue::TextList(values) => values.join(","),
        }
    }
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Client(_) => EntityKind::Client,
            Entity::Worker(_) => EntityKind::Worker,
            Entity::Task(_) => EntityKind::Task,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Client(client) => &client.client_id,
            Entity::Worker(worker) => &worker.worker_id,
            Entity::Task(task) => &task.task_id,
        }
    }

    /// Field values in canonical export order.
    pub fn values(&self) -> Vec<(Field, FieldValue)> {
        match self {
            Entity::Client(c) => vec![
                (Field::ClientId, FieldValue::Text(c.client_id.clone())),
                (Field::ClientName, FieldValue::Text(c.client_name.clone())),
                (Field::PriorityLevel, FieldValue::Int(c.priority_level)),
                (
                    Field::RequestedTaskIds,
                    FieldValue::TextList(c.requested_task_ids.clone()),
                ),
                (Field::GroupTag, FieldValue::Text(c.group_tag.clone())),
                (Field::AttributesJson, FieldValue::Text(c.attributes_json.clone())),
            ],
            Entity::Worker(w) => vec![
                (Field::WorkerId, FieldValue::Text(w.worker_id.clone())),
                (Field::WorkerName, FieldValue::Text(w.worker_name.clone())),
                (Field::Skills, FieldValue::TextList(w.skills.clone())),
                (Field::AvailableSlots, FieldValue::IntList(w.available_slots.clone())),
                (Field::MaxLoadPerPhase, FieldValue::Int(w.max_load_per_phase)),
                (Field::WorkerGroup, FieldValue::Text(w.worker_group.clone())),
                (Field::QualificationLevel, FieldValue::Int(w.qualification_level)),
            ],
            Entity::Task(t) => vec![
                (Field::TaskId, FieldValue::Text(t.task_id.clone())),
                (Field::TaskName, FieldValue::Text(t.task_name.clone())),
                (Field::Category, FieldValue::Text(t.category.clone())),
                (Field::Duration, FieldValue::Int(t.duration)),
                (Field::RequiredSkills, FieldValue::TextList(t.required_skills.clone())),
                (Field::PreferredPhases, FieldValue::IntList(t.preferred_phases.clone())),
                (Field::MaxConcurrent, FieldValue::Int(t.max_concurrent)),
            ],
        }
    }
}

impl From<Client> for Entity {
    fn from(client: Client) -> Self {
        Entity::Client(client)
    }
}

impl From<Worker> for Entity {
    fn from(worker: Worker) -> Self {
        Entity::Worker(worker)
    }
}

impl From<Task> for Entity {
    fn from(task: Task) -> Self {
        Entity::Task(task)
    }
}

/// All entities of a batch, split per kind.
///
/// This is the input of cross-entity validation; order within each
/// collection is the row order it was ingested in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCollections {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
}

impl EntityCollections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        match entity {
            Entity::Client(client) => self.clients.push(client),
            Entity::Worker(worker) => self.workers.push(worker),
            Entity::Task(task) => self.tasks.push(task),
        }
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Client => self.clients.len(),
            EntityKind::Worker => self.workers.len(),
            EntityKind::Task => self.tasks.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.clients.len() + self.workers.len() + self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Entities of one kind wrapped back into [`Entity`].
    pub fn entities(&self, kind: EntityKind) -> Vec<Entity> {
        match kind {
            EntityKind::Client => self.clients.iter().cloned().map(Entity::from).collect(),
            EntityKind::Worker => self.workers.iter().cloned().map(Entity::from).collect(),
            EntityKind::Task => self.tasks.iter().cloned().map(Entity::from).collect(),
        }
    }
}

impl FromIterator<Entity> for EntityCollections {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut collections = EntityCollections::new();
        for entity in iter {
            collections.push(entity);
        }
        collections
    }
}
