//! Diagnostic types shared by the transformer and the validation engine.
//!
//! A [`ValidationError`] is created once and only ever aggregated afterwards;
//! none of the pipeline stages mutate a diagnostic after it is produced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kind::EntityKind;

/// Field tag used when a diagnostic concerns the whole row.
pub const ALL_FIELDS: &str = "ALL";

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Record cannot be trusted downstream without a fix
    Error,
    /// A repair or best-effort guess was applied
    Warning,
    /// Advisory only
    Info,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable code identifying what a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    // Transformer
    MissingId,
    InvalidId,
    RangeClamped,
    ListFiltered,
    InvalidNumber,
    NumberDefaulted,
    NumberRounded,
    InvalidJson,
    RowFailed,

    // Header mapping
    MissingColumn,
    ShadowedHeader,

    // Validation engine
    DuplicateId,
    OutOfRange,
    EmptyList,
    DanglingReference,
    IdPrefix,
    OverloadedWorker,
    UncoveredSkill,
    ConcurrencyInfeasible,
    PhaseSaturated,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::MissingId => "missing-id",
            IssueCode::InvalidId => "invalid-id",
            IssueCode::RangeClamped => "range-clamped",
            IssueCode::ListFiltered => "list-filtered",
            IssueCode::InvalidNumber => "invalid-number",
            IssueCode::NumberDefaulted => "number-defaulted",
            IssueCode::NumberRounded => "number-rounded",
            IssueCode::InvalidJson => "invalid-json",
            IssueCode::RowFailed => "row-failed",
            IssueCode::MissingColumn => "missing-column",
            IssueCode::ShadowedHeader => "shadowed-header",
            IssueCode::DuplicateId => "duplicate-id",
            IssueCode::OutOfRange => "out-of-range",
            IssueCode::EmptyList => "empty-list",
            IssueCode::DanglingReference => "dangling-reference",
            IssueCode::IdPrefix => "id-prefix",
            IssueCode::OverloadedWorker => "overloaded-worker",
            IssueCode::UncoveredSkill => "uncovered-skill",
            IssueCode::ConcurrencyInfeasible => "concurrency-infeasible",
            IssueCode::PhaseSaturated => "phase-saturated",
        }
    }

    /// Default severity for diagnostics carrying this code.
    pub fn default_severity(&self) -> Severity {
        match self {
            IssueCode::InvalidJson
            | IssueCode::RowFailed
            | IssueCode::MissingColumn
            | IssueCode::DuplicateId
            | IssueCode::OutOfRange => Severity::Error,
            IssueCode::NumberDefaulted | IssueCode::ShadowedHeader | IssueCode::PhaseSaturated => {
                Severity::Info
            }
            _ => Severity::Warning,
        }
    }

    /// Whether the remediation is mechanical (clamp, trim, default).
    pub fn auto_fixable(&self) -> bool {
        matches!(
            self,
            IssueCode::MissingId
                | IssueCode::InvalidId
                | IssueCode::RangeClamped
                | IssueCode::ListFiltered
                | IssueCode::InvalidNumber
                | IssueCode::NumberDefaulted
                | IssueCode::NumberRounded
                | IssueCode::OutOfRange
                | IssueCode::ConcurrencyInfeasible
        )
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic about an entity, a row, or a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Deterministic identifier: `code/kind/row/field[/detail]`.
    pub id: String,
    pub code: IssueCode,
    pub entity_type: EntityKind,
    pub entity_id: String,
    /// 0-based data row index (0 for file-level diagnostics).
    pub row: usize,
    /// Canonical field name, a raw header, or [`ALL_FIELDS`].
    pub field: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    pub auto_fixable: bool,
}

impl ValidationError {
    /// Build a diagnostic with the code's default severity and fixability.
    pub fn new(
        code: IssueCode,
        entity_type: EntityKind,
        entity_id: impl Into<String>,
        row: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let field = field.into();
        Self {
            id: format!("{code}/{entity_type}/{row}/{field}"),
            code,
            entity_type,
            entity_id: entity_id.into(),
            row,
            field,
            message: message.into(),
            severity: code.default_severity(),
            suggested_fix: None,
            auto_fixable: code.auto_fixable(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    /// Disambiguate the identifier when one field yields several diagnostics.
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.id = format!("{}/{detail}", self.id);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} row {} {}: {}",
            self.severity, self.entity_type, self.entity_id, self.row, self.field, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_code_defaults() {
        let diag = ValidationError::new(
            IssueCode::RangeClamped,
            EntityKind::Client,
            "C001",
            3,
            "PriorityLevel",
            "clamped",
        );
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.auto_fixable);
        assert_eq!(diag.id, "range-clamped/client/3/PriorityLevel");
    }

    #[test]
    fn detail_extends_id() {
        let diag = ValidationError::new(
            IssueCode::DanglingReference,
            EntityKind::Client,
            "C001",
            0,
            "RequestedTaskIDs",
            "missing",
        )
        .with_detail("T999");
        assert_eq!(diag.id, "dangling-reference/client/0/RequestedTaskIDs/T999");
        assert!(!diag.auto_fixable);
    }

    #[test]
    fn serializes_camel_case() {
        let diag = ValidationError::new(
            IssueCode::RowFailed,
            EntityKind::Task,
            "",
            1,
            ALL_FIELDS,
            "boom",
        );
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["entityType"], "task");
        assert_eq!(json["autoFixable"], false);
        assert_eq!(json["severity"], "error");
        assert_eq!(json["code"], "row-failed");
        assert!(json.get("suggestedFix").is_none());
    }
}
