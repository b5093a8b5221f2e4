//! Multi-file batches and the validation barrier.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use roster_model::{
    BatchSummary, EntityCollections, EntityKind, FileFailure, ParsingResult, Severity,
};
use roster_validate::{ValidationReport, validate};

use crate::options::PipelineOptions;
use crate::pipeline::parse_file;
use crate::source::SourceFile;

/// At most one upload per entity kind.
#[derive(Debug, Clone, Default)]
pub struct BatchInput {
    pub clients: Option<SourceFile>,
    pub workers: Option<SourceFile>,
    pub tasks: Option<SourceFile>,
    /// Files that could not be read; reported alongside extraction failures.
    pub unread: Vec<FileFailure>,
}

impl BatchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, kind: EntityKind, file: SourceFile) -> Self {
        *self.slot(kind) = Some(file);
        self
    }

    /// Read `path` for `kind`. A read failure is recorded instead of
    /// returned so the other files still run.
    pub fn with_path(self, kind: EntityKind, path: &Path, max_bytes: u64) -> Self {
        match SourceFile::from_path(path, max_bytes) {
            Ok(file) => self.with_file(kind, file),
            Err(error) => {
                tracing::warn!(path = %path.display(), kind = %kind, %error, "file unreadable");
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.with_failure(FileFailure {
                    kind,
                    file_name,
                    message: error.to_string(),
                })
            }
        }
    }

    pub fn with_failure(mut self, failure: FileFailure) -> Self {
        self.unread.push(failure);
        self
    }

    fn slot(&mut self, kind: EntityKind) -> &mut Option<SourceFile> {
        match kind {
            EntityKind::Client => &mut self.clients,
            EntityKind::Worker => &mut self.workers,
            EntityKind::Task => &mut self.tasks,
        }
    }

    /// Present files in ingestion order.
    pub fn files(&self) -> Vec<(EntityKind, &SourceFile)> {
        [
            (EntityKind::Client, self.clients.as_ref()),
            (EntityKind::Worker, self.workers.as_ref()),
            (EntityKind::Task, self.tasks.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, file)| file.map(|f| (kind, f)))
        .collect()
    }
}

/// Everything a batch run produced.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// One result per successfully extracted file, in ingestion order.
    pub results: Vec<ParsingResult>,
    pub failures: Vec<FileFailure>,
    pub summary: BatchSummary,
    pub collections: EntityCollections,
    pub validation: ValidationReport,
}

impl BatchOutcome {
    pub fn result(&self, kind: EntityKind) -> Option<&ParsingResult> {
        self.results.iter().find(|r| r.kind == kind)
    }

    /// Failed files, parse errors, or validation errors.
    pub fn has_blocking_errors(&self) -> bool {
        !self.failures.is_empty()
            || self.results.iter().any(ParsingResult::has_errors)
            || self
                .validation
                .issues
                .iter()
                .any(|issue| issue.severity == Severity::Error)
    }
}

/// Parse every file, then validate all entities together.
///
/// Files are independent: a file that fails extraction is recorded in
/// `failures` and the others still run.
pub fn process_batch(input: &BatchInput, options: &PipelineOptions) -> BatchOutcome {
    let started = Instant::now();
    let files = input.files();
    let _span = tracing::info_span!(
        "batch",
        files = files.len(),
        unread = input.unread.len()
    )
    .entered();

    let run = |(kind, file): &(EntityKind, &SourceFile)| {
        parse_file(*kind, file, options).map_err(|error| {
            tracing::warn!(file = %file.name, kind = %kind, %error, "file rejected");
            FileFailure {
                kind: *kind,
                file_name: file.name.clone(),
                message: error.to_string(),
            }
        })
    };
    let outcomes: Vec<_> = if options.parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    let mut results = Vec::new();
    let mut failures = input.unread.clone();
    for outcome in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(failure) => failures.push(failure),
        }
    }

    let collections: EntityCollections = results
        .iter()
        .flat_map(|result| result.data.iter().cloned())
        .collect();
    let validation = validate(&collections);
    let summary = BatchSummary::from_results(
        &results,
        failures.iter().map(|f| f.file_name.clone()).collect(),
    );

    tracing::info!(
        successful = summary.successful_files,
        failed = summary.failed_files.len(),
        entities = summary.total_entities,
        errors = summary.total_errors,
        warnings = summary.total_warnings,
        score = validation.score,
        duration_ms = started.elapsed().as_millis() as u64,
        "batch complete"
    );

    BatchOutcome {
        results,
        failures,
        summary,
        collections,
        validation,
    }
}

/// Re-run validation after entities were edited outside the pipeline.
pub fn revalidate(collections: &EntityCollections) -> ValidationReport {
    let _span = tracing::info_span!("revalidate", entities = collections.total()).entered();
    validate(collections)
}
