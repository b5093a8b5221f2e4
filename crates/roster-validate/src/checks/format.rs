//! Skill list shape and attribute JSON syntax.

use roster_model::{EntityCollections, EntityKind, Field, IssueCode, ValidationError};

pub fn check(collections: &EntityCollections) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    for (idx, worker) in collections.workers.iter().enumerate() {
        if let Some(issue) = skill_list(
            EntityKind::Worker,
            &worker.worker_id,
            idx,
            Field::Skills,
            &worker.skills,
        ) {
            issues.push(issue);
        }
    }
    for (idx, task) in collections.tasks.iter().enumerate() {
        if let Some(issue) = skill_list(
            EntityKind::Task,
            &task.task_id,
            idx,
            Field::RequiredSkills,
            &task.required_skills,
        ) {
            issues.push(issue);
        }
    }

    for (idx, client) in collections.clients.iter().enumerate() {
        let raw = client.attributes_json.trim();
        if raw.is_empty() || raw == "{}" {
            continue;
        }
        if let Err(err) = serde_json::from_str::<serde_json::Value>(raw) {
            issues.push(
                ValidationError::new(
                    IssueCode::InvalidJson,
                    EntityKind::Client,
                    &client.client_id,
                    idx,
                    Field::AttributesJson.name(),
                    format!("AttributesJSON is not valid JSON: {err}"),
                )
                .with_fix("Fix the JSON syntax or clear the cell"),
            );
        }
    }

    issues
}

fn skill_list(
    kind: EntityKind,
    id: &str,
    idx: usize,
    field: Field,
    skills: &[String],
) -> Option<ValidationError> {
    let message = if skills.is_empty() {
        format!("{field} is empty")
    } else if skills.iter().any(|s| s.trim().is_empty()) {
        format!("{field} contains blank entries")
    } else {
        return None;
    };
    Some(
        ValidationError::new(IssueCode::EmptyList, kind, id, idx, field.name(), message)
            .with_fix(format!("List at least one skill in {field}")),
    )
}
