//! Validation engine for roster data.
//!
//! Runs after every file has been transformed: cross-entity checks need the
//! complete task collection before client references can be resolved.
//! Checks only annotate; they never drop or change entities.

mod checks;
mod report;
mod util;

use std::time::Instant;

use roster_model::EntityCollections;

pub use report::{KindCounts, ValidationReport, quality_score};
pub use util::CaseInsensitiveSet;

/// Validate all entity collections together.
pub fn validate(collections: &EntityCollections) -> ValidationReport {
    let started = Instant::now();
    let _span = tracing::info_span!(
        "validate",
        clients = collections.clients.len(),
        workers = collections.workers.len(),
        tasks = collections.tasks.len()
    )
    .entered();

    let report = ValidationReport::from_issues(checks::run_all(collections));

    tracing::info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        info = report.info_count(),
        score = report.score,
        duration_ms = started.elapsed().as_millis() as u64,
        "validation complete"
    );
    report
}
