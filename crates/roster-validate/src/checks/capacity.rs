//! Worker capacity against task demand.

use std::collections::BTreeMap;

use roster_model::{EntityCollections, EntityKind, Field, IssueCode, Severity, ValidationError};

use crate::util::CaseInsensitiveSet;

/// A worker cannot carry more load per phase than it has slots.
pub fn overloaded_workers(collections: &EntityCollections) -> Vec<ValidationError> {
    collections
        .workers
        .iter()
        .enumerate()
        .filter(|(_, w)| (w.available_slots.len() as i64) < w.max_load_per_phase)
        .map(|(idx, w)| {
            let slots = w.available_slots.len();
            ValidationError::new(
                IssueCode::OverloadedWorker,
                EntityKind::Worker,
                &w.worker_id,
                idx,
                Field::MaxLoadPerPhase.name(),
                format!(
                    "Worker '{}' has MaxLoadPerPhase {} but only {slots} available slot(s)",
                    w.worker_id, w.max_load_per_phase
                ),
            )
            .with_fix(format!("Set MaxLoadPerPhase to {}", slots.max(1)))
        })
        .collect()
}

/// Every required skill should be held by at least one worker.
pub fn skill_coverage(collections: &EntityCollections) -> Vec<ValidationError> {
    let available: CaseInsensitiveSet = collections
        .workers
        .iter()
        .flat_map(|w| w.skills.iter())
        .collect();

    let mut issues = Vec::new();
    for (idx, task) in collections.tasks.iter().enumerate() {
        for skill in &task.required_skills {
            if available.contains(skill) {
                continue;
            }
            issues.push(
                ValidationError::new(
                    IssueCode::UncoveredSkill,
                    EntityKind::Task,
                    &task.task_id,
                    idx,
                    Field::RequiredSkills.name(),
                    format!(
                        "No worker has skill '{skill}' required by task '{}'",
                        task.task_id
                    ),
                )
                .with_detail(skill),
            );
        }
    }
    issues
}

/// `MaxConcurrent` cannot exceed the number of workers qualified for the task.
pub fn concurrency(collections: &EntityCollections) -> Vec<ValidationError> {
    let worker_skills: Vec<CaseInsensitiveSet> = collections
        .workers
        .iter()
        .map(|w| w.skills.iter().collect())
        .collect();

    let mut issues = Vec::new();
    for (idx, task) in collections.tasks.iter().enumerate() {
        let qualified = worker_skills
            .iter()
            .filter(|skills| skills.contains_all(&task.required_skills))
            .count();
        // Zero qualified workers is already reported as an uncovered skill.
        if qualified == 0 || (qualified as i64) >= task.max_concurrent {
            continue;
        }
        issues.push(
            ValidationError::new(
                IssueCode::ConcurrencyInfeasible,
                EntityKind::Task,
                &task.task_id,
                idx,
                Field::MaxConcurrent.name(),
                format!(
                    "Task '{}' allows {} concurrent workers but only {qualified} are qualified",
                    task.task_id, task.max_concurrent
                ),
            )
            .with_fix(format!("Lower MaxConcurrent to {qualified}")),
        );
    }
    issues
}

/// Per phase, task demand (summed durations) should fit worker capacity
/// (summed `MaxLoadPerPhase` of workers available in that phase).
pub fn phase_saturation(collections: &EntityCollections) -> Vec<ValidationError> {
    let mut demand: BTreeMap<i64, i64> = BTreeMap::new();
    for task in &collections.tasks {
        for phase in &task.preferred_phases {
            *demand.entry(*phase).or_default() += task.duration;
        }
    }

    let mut capacity: BTreeMap<i64, i64> = BTreeMap::new();
    for worker in &collections.workers {
        for slot in &worker.available_slots {
            *capacity.entry(*slot).or_default() += worker.max_load_per_phase;
        }
    }

    demand
        .into_iter()
        .filter_map(|(phase, needed)| {
            let available = capacity.get(&phase).copied().unwrap_or(0);
            (needed > available).then(|| {
                ValidationError::new(
                    IssueCode::PhaseSaturated,
                    EntityKind::Task,
                    "",
                    0,
                    Field::PreferredPhases.name(),
                    format!(
                        "Phase {phase}: task demand {needed} exceeds worker capacity {available}"
                    ),
                )
                .with_severity(Severity::Info)
                .with_detail(&phase.to_string())
            })
        })
        .collect()
}
