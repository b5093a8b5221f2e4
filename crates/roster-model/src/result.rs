//! Per-file and per-batch pipeline outputs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::diagnostic::{Severity, ValidationError};
use crate::entity::Entity;
use crate::field::Field;
use crate::kind::EntityKind;
use crate::mapping::FieldMapping;

/// Everything produced by parsing one uploaded file.
///
/// `errors` holds error-severity diagnostics; `warnings` holds both warnings
/// and advisory notes. Immutable once returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingResult {
    pub kind: EntityKind,
    pub file_name: String,
    pub data: Vec<Entity>,
    pub headers: Vec<String>,
    pub mapped_headers: BTreeMap<String, Field>,
    pub total_rows: usize,
    pub processed_rows: usize,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
    pub suggestions: Vec<FieldMapping>,
}

impl ParsingResult {
    pub fn new(kind: EntityKind, file_name: impl Into<String>) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            data: Vec::new(),
            headers: Vec::new(),
            mapped_headers: BTreeMap::new(),
            total_rows: 0,
            processed_rows: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Route a diagnostic into the bucket matching its severity.
    pub fn push_diagnostic(&mut self, diagnostic: ValidationError) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning | Severity::Info => self.warnings.push(diagnostic),
        }
    }

    pub fn extend_diagnostics(&mut self, diagnostics: impl IntoIterator<Item = ValidationError>) {
        for diagnostic in diagnostics {
            self.push_diagnostic(diagnostic);
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Warning-severity diagnostics only; advisory notes are not counted.
    pub fn warning_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

/// A file rejected during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub kind: EntityKind,
    pub file_name: String,
    pub message: String,
}

/// Aggregate counts over one batch of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_files: usize,
    pub successful_files: usize,
    /// Names of files whose extraction failed.
    pub failed_files: Vec<String>,
    pub total_entities: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl BatchSummary {
    pub fn from_results<'a>(
        results: impl IntoIterator<Item = &'a ParsingResult>,
        failed_files: Vec<String>,
    ) -> Self {
        let mut summary = BatchSummary {
            failed_files,
            ..Default::default()
        };
        for result in results {
            summary.successful_files += 1;
            summary.total_entities += result.data.len();
            summary.total_errors += result.error_count();
            summary.total_warnings += result.warning_count();
        }
        summary.total_files = summary.successful_files + summary.failed_files.len();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::IssueCode;

    fn diag(code: IssueCode) -> ValidationError {
        ValidationError::new(code, EntityKind::Client, "C1", 0, "ClientID", "m")
    }

    #[test]
    fn diagnostics_are_bucketed_by_severity() {
        let mut result = ParsingResult::new(EntityKind::Client, "clients.csv");
        result.push_diagnostic(diag(IssueCode::InvalidJson));
        result.push_diagnostic(diag(IssueCode::RangeClamped));
        result.push_diagnostic(diag(IssueCode::NumberDefaulted));
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warning_count(), 1);
        assert!(result.has_errors());
    }

    #[test]
    fn summary_counts_failed_files() {
        let mut result = ParsingResult::new(EntityKind::Task, "tasks.csv");
        result.push_diagnostic(diag(IssueCode::RangeClamped));
        let summary = BatchSummary::from_results([&result], vec!["workers.xlsx".into()]);
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(summary.total_warnings, 1);
        assert_eq!(summary.failed_files, vec!["workers.xlsx".to_string()]);
    }
}
