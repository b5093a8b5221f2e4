//! Validation check modules.
//!
//! Each module performs one family of checks over the full entity
//! collections. Checks never mutate entities.

mod capacity;
mod format;
mod identity;
mod range;
mod reference;

use roster_model::{EntityCollections, ValidationError};

/// Run every check, in a fixed order.
pub fn run_all(collections: &EntityCollections) -> Vec<ValidationError> {
    let mut issues = Vec::new();

    // 1. Duplicate identifiers within each collection
    issues.extend(identity::duplicates(collections));

    // 2. Identifier prefix convention
    issues.extend(identity::prefixes(collections));

    // 3. Numeric bounds (scalars and integer lists)
    issues.extend(range::check(collections));

    // 4. List shape and attribute JSON
    issues.extend(format::check(collections));

    // 5. Client task references
    issues.extend(reference::check(collections));

    // 6. Worker load against declared slots
    issues.extend(capacity::overloaded_workers(collections));

    // 7. Skill, concurrency, and phase capacity need both workers and tasks
    if !collections.workers.is_empty() && !collections.tasks.is_empty() {
        issues.extend(capacity::skill_coverage(collections));
        issues.extend(capacity::concurrency(collections));
        issues.extend(capacity::phase_saturation(collections));
    }

    issues
}
