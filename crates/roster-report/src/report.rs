//! One document merging per-file parsing output and batch validation.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roster_model::{
    BatchSummary, EntityKind, Field, FieldMapping, FileFailure, IssueCode, ParsingResult,
    Severity, ValidationError,
};
use roster_validate::{ValidationReport, quality_score};

use crate::error::Result;

/// Per-file section of the report (entities themselves are exported separately).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSection {
    pub kind: EntityKind,
    pub file_name: String,
    pub headers: Vec<String>,
    pub mapped_headers: BTreeMap<String, Field>,
    pub total_rows: usize,
    pub processed_rows: usize,
    pub suggestions: Vec<FieldMapping>,
}

impl From<&ParsingResult> for FileSection {
    fn from(result: &ParsingResult) -> Self {
        Self {
            kind: result.kind,
            file_name: result.file_name.clone(),
            headers: result.headers.clone(),
            mapped_headers: result.mapped_headers.clone(),
            total_rows: result.total_rows,
            processed_rows: result.processed_rows,
            suggestions: result.suggestions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    /// Quality score over every merged diagnostic.
    pub score: u32,
    pub files: Vec<FileSection>,
    pub failures: Vec<FileFailure>,
    /// Error-severity diagnostics from parsing and validation.
    pub errors: Vec<ValidationError>,
    /// Warning and advisory diagnostics from parsing and validation.
    pub warnings: Vec<ValidationError>,
    pub validation: ValidationReport,
}

type DiagnosticKey = (IssueCode, EntityKind, String, String);

fn key(diagnostic: &ValidationError) -> DiagnosticKey {
    (
        diagnostic.code,
        diagnostic.entity_type,
        diagnostic.entity_id.clone(),
        diagnostic.field.clone(),
    )
}

impl DiagnosticsReport {
    /// Merge parsing and validation diagnostics.
    ///
    /// A validation issue restating a parse diagnostic for the same entity and
    /// field (malformed attribute JSON, for example) is listed once.
    pub fn build(
        results: &[ParsingResult],
        failures: &[FileFailure],
        summary: &BatchSummary,
        validation: &ValidationReport,
    ) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut seen: HashSet<DiagnosticKey> = HashSet::new();

        for diagnostic in results.iter().flat_map(ParsingResult::diagnostics) {
            seen.insert(key(diagnostic));
            match diagnostic.severity {
                Severity::Error => errors.push(diagnostic.clone()),
                Severity::Warning | Severity::Info => warnings.push(diagnostic.clone()),
            }
        }
        for issue in &validation.issues {
            if seen.contains(&key(issue)) {
                continue;
            }
            match issue.severity {
                Severity::Error => errors.push(issue.clone()),
                Severity::Warning | Severity::Info => warnings.push(issue.clone()),
            }
        }

        let warning_count = warnings
            .iter()
            .filter(|w| w.severity == Severity::Warning)
            .count();
        Self {
            generated_at: Utc::now(),
            summary: summary.clone(),
            score: quality_score(errors.len(), warning_count),
            files: results.iter().map(FileSection::from).collect(),
            failures: failures.to_vec(),
            errors,
            warnings,
            validation: validation.clone(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Errors block further processing unless explicitly accepted.
    pub fn has_blocking_errors(&self) -> bool {
        !self.errors.is_empty() || !self.failures.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
