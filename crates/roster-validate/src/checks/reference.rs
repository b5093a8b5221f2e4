//! Client task references.

use std::collections::HashSet;

use roster_model::{EntityCollections, EntityKind, Field, IssueCode, ValidationError};

/// Each requested task ID must name an existing task.
pub fn check(collections: &EntityCollections) -> Vec<ValidationError> {
    let task_ids: HashSet<&str> = collections
        .tasks
        .iter()
        .map(|task| task.task_id.trim())
        .collect();

    let mut issues = Vec::new();
    for (idx, client) in collections.clients.iter().enumerate() {
        for requested in &client.requested_task_ids {
            let requested = requested.trim();
            if task_ids.contains(requested) {
                continue;
            }
            issues.push(
                ValidationError::new(
                    IssueCode::DanglingReference,
                    EntityKind::Client,
                    &client.client_id,
                    idx,
                    Field::RequestedTaskIds.name(),
                    format!(
                        "Client '{}' requests unknown task '{requested}'",
                        client.client_id
                    ),
                )
                .with_detail(requested)
                .with_fix(format!("Add task '{requested}' or remove it from RequestedTaskIDs")),
            );
        }
    }
    issues
}
