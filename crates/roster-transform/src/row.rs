//! Per-row transformation into a typed entity.

use std::collections::BTreeMap;

use roster_model::{
    ALL_FIELDS, CellValue, Client, Entity, EntityKind, Field, FieldType, IssueCode, Task,
    ValidationError, Worker, redact_value,
};

use crate::coerce::{
    DEFAULT_NUMBER, ParsedNumber, check_json, clean_text_list, format_ints, is_valid_id,
    parse_int_list, parse_number, placeholder_id, sanitize_id, split_list,
};
use crate::error::TransformError;

/// Raw values of one input row, keyed by canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRow {
    /// 0-based data row index, used only for diagnostics.
    pub row: usize,
    pub cells: BTreeMap<Field, CellValue>,
}

impl MappedRow {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, field: Field, value: impl Into<CellValue>) -> Self {
        self.cells.insert(field, value.into());
        self
    }

    /// Build from positional values and the field each column feeds.
    ///
    /// Unmapped columns are skipped; if two columns feed one field the first wins.
    pub fn from_columns<I>(row: usize, columns: &[Option<Field>], values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut cells = BTreeMap::new();
        for (field, value) in columns.iter().zip(values) {
            if let Some(field) = field {
                cells.entry(*field).or_insert(CellValue::Text(value));
            }
        }
        Self { row, cells }
    }

    pub fn get(&self, field: Field) -> Option<&CellValue> {
        self.cells.get(&field)
    }

    /// True when every mapped cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }
}

/// A successfully transformed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedRow {
    pub row: usize,
    pub entity: Entity,
    /// Repairs applied to this row (never a whole-row failure).
    pub diagnostics: Vec<ValidationError>,
}

/// Either an entity with its repair diagnostics, or the single diagnostic
/// explaining why the row was dropped.
pub type RowOutcome = Result<TransformedRow, ValidationError>;

/// Transform one row. Never panics on malformed input; never reads other rows.
pub fn transform_row(kind: EntityKind, row: &MappedRow) -> RowOutcome {
    let mut ctx = RowContext::new(kind, row);
    match ctx.build() {
        Ok(entity) => Ok(TransformedRow {
            row: row.row,
            entity,
            diagnostics: ctx.diagnostics,
        }),
        Err(err) => {
            tracing::debug!(kind = %kind, row = row.row, error = %err, "row dropped");
            Err(ValidationError::new(
                IssueCode::RowFailed,
                kind,
                ctx.entity_id,
                row.row,
                ALL_FIELDS,
                format!("Row {} could not be transformed: {err}", row.row + 1),
            ))
        }
    }
}

struct RowContext<'a> {
    kind: EntityKind,
    row: &'a MappedRow,
    entity_id: String,
    diagnostics: Vec<ValidationError>,
}

impl<'a> RowContext<'a> {
    fn new(kind: EntityKind, row: &'a MappedRow) -> Self {
        Self {
            kind,
            row,
            entity_id: String::new(),
            diagnostics: Vec::new(),
        }
    }

    fn build(&mut self) -> Result<Entity, TransformError> {
        if let Some(field) = self.row.cells.keys().find(|f| f.kind() != self.kind) {
            return Err(TransformError::ForeignField {
                field: *field,
                kind: self.kind,
            });
        }

        self.entity_id = self.id()?;
        let entity = match self.kind {
            EntityKind::Client => Entity::Client(Client {
                client_id: self.entity_id.clone(),
                client_name: self.text(Field::ClientName)?,
                priority_level: self.int(Field::PriorityLevel)?,
                requested_task_ids: self.text_list(Field::RequestedTaskIds),
                group_tag: self.text(Field::GroupTag)?,
                attributes_json: self.json(Field::AttributesJson)?,
            }),
            EntityKind::Worker => Entity::Worker(Worker {
                worker_id: self.entity_id.clone(),
                worker_name: self.text(Field::WorkerName)?,
                skills: self.text_list(Field::Skills),
                available_slots: self.int_list(Field::AvailableSlots),
                max_load_per_phase: self.int(Field::MaxLoadPerPhase)?,
                worker_group: self.text(Field::WorkerGroup)?,
                qualification_level: self.int(Field::QualificationLevel)?,
            }),
            EntityKind::Task => Entity::Task(Task {
                task_id: self.entity_id.clone(),
                task_name: self.text(Field::TaskName)?,
                category: self.text(Field::Category)?,
                duration: self.int(Field::Duration)?,
                required_skills: self.text_list(Field::RequiredSkills),
                preferred_phases: self.int_list(Field::PreferredPhases),
                max_concurrent: self.int(Field::MaxConcurrent)?,
            }),
        };
        Ok(entity)
    }

    fn diagnostic(&self, code: IssueCode, field: Field, message: String) -> ValidationError {
        ValidationError::new(
            code,
            self.kind,
            self.entity_id.clone(),
            self.row.row,
            field.name(),
            message,
        )
    }

    fn push(&mut self, diagnostic: ValidationError) {
        self.diagnostics.push(diagnostic);
    }

    /// Scalar text of a cell. A one-item list is unwrapped.
    fn scalar(&self, field: Field) -> Result<String, TransformError> {
        match self.row.get(field) {
            None => Ok(String::new()),
            Some(CellValue::Text(text)) => Ok(text.clone()),
            Some(CellValue::List(items)) => match items.as_slice() {
                [] => Ok(String::new()),
                [single] => Ok(single.clone()),
                _ => Err(TransformError::UnexpectedList {
                    field,
                    count: items.len(),
                }),
            },
        }
    }

    fn id(&mut self) -> Result<String, TransformError> {
        let field = Field::id_field(self.kind);
        let raw = self.scalar(field)?;
        let trimmed = raw.trim();
        if is_valid_id(trimmed) {
            return Ok(trimmed.to_string());
        }

        let placeholder = placeholder_id(self.kind.id_prefix(), self.row.row);
        if trimmed.is_empty() {
            let message = format!("{field} is blank; assigned placeholder {placeholder}");
            self.entity_id = placeholder.clone();
            let diagnostic = self
                .diagnostic(IssueCode::MissingId, field, message)
                .with_fix(format!("Provide a unique {field}"));
            self.push(diagnostic);
            return Ok(placeholder);
        }

        let replacement = sanitize_id(trimmed).unwrap_or(placeholder);
        tracing::trace!(field = %field, raw = redact_value(trimmed), "sanitized identifier");
        let message = format!("{field} '{trimmed}' is not a valid identifier; using {replacement}");
        self.entity_id = replacement.clone();
        let diagnostic = self
            .diagnostic(IssueCode::InvalidId, field, message)
            .with_fix(format!("Set {field} to {replacement}"));
        self.push(diagnostic);
        Ok(replacement)
    }

    fn text(&self, field: Field) -> Result<String, TransformError> {
        Ok(self.scalar(field)?.trim().to_string())
    }

    fn int(&mut self, field: Field) -> Result<i64, TransformError> {
        let raw = self.scalar(field)?;
        let Some((min, max)) = field.field_type().bounds() else {
            return Ok(DEFAULT_NUMBER);
        };
        let trimmed = raw.trim();

        let (value, rounded_from) = match parse_number(trimmed) {
            ParsedNumber::Integer(value) => (value, None),
            ParsedNumber::Rounded { original, value } => (value, Some(original)),
            ParsedNumber::Blank => {
                let diagnostic = self.diagnostic(
                    IssueCode::NumberDefaulted,
                    field,
                    format!("{field} is blank; defaulted to {DEFAULT_NUMBER}"),
                );
                self.push(diagnostic);
                return Ok(DEFAULT_NUMBER);
            }
            ParsedNumber::Invalid => {
                let diagnostic = self
                    .diagnostic(
                        IssueCode::InvalidNumber,
                        field,
                        format!("{field} '{trimmed}' is not a number; defaulted to {DEFAULT_NUMBER}"),
                    )
                    .with_fix(format!("Enter a whole number between {min} and {max}"));
                self.push(diagnostic);
                return Ok(DEFAULT_NUMBER);
            }
        };

        // An out-of-range value reports the clamp only, even when it was also rounded.
        let clamped = value.clamp(min, max);
        if clamped != value {
            let diagnostic = self
                .diagnostic(
                    IssueCode::RangeClamped,
                    field,
                    format!("{field} {trimmed} is outside {min}-{max}; clamped to {clamped}"),
                )
                .with_fix(format!("Set {field} to {clamped}"));
            self.push(diagnostic);
        } else if let Some(original) = rounded_from {
            let diagnostic = self.diagnostic(
                IssueCode::NumberRounded,
                field,
                format!("{field} {original} is not a whole number; rounded to {value}"),
            );
            self.push(diagnostic);
        }
        Ok(clamped)
    }

    fn items(&self, field: Field) -> Vec<String> {
        match self.row.get(field) {
            None => Vec::new(),
            Some(CellValue::Text(text)) => split_list(text),
            Some(CellValue::List(items)) => items.clone(),
        }
    }

    fn text_list(&self, field: Field) -> Vec<String> {
        clean_text_list(self.items(field))
    }

    fn int_list(&mut self, field: Field) -> Vec<i64> {
        let FieldType::IntList { min, max } = field.field_type() else {
            return Vec::new();
        };
        let parsed = parse_int_list(self.items(field), min, max);
        if !parsed.dropped.is_empty() {
            let kept = format_ints(&parsed.kept);
            let diagnostic = self
                .diagnostic(
                    IssueCode::ListFiltered,
                    field,
                    format!(
                        "{field} dropped entries outside {min}-{max} ({}); kept {kept}",
                        parsed.dropped.join(", ")
                    ),
                )
                .with_fix(format!("Set {field} to {kept}"));
            self.push(diagnostic);
        }
        parsed.kept
    }

    fn json(&mut self, field: Field) -> Result<String, TransformError> {
        let raw = self.scalar(field)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok("{}".to_string());
        }
        if let Err(reason) = check_json(trimmed) {
            let diagnostic = self
                .diagnostic(
                    IssueCode::InvalidJson,
                    field,
                    format!("{field} is not valid JSON: {reason}"),
                )
                .with_fix("Fix the JSON syntax or clear the cell");
            self.push(diagnostic);
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::Severity;

    fn client_row(priority: &str) -> MappedRow {
        MappedRow::new(0)
            .with_cell(Field::ClientId, "C001")
            .with_cell(Field::ClientName, "Acme")
            .with_cell(Field::PriorityLevel, priority)
    }

    fn client(outcome: &RowOutcome) -> &Client {
        match &outcome.as_ref().expect("row transforms").entity {
            Entity::Client(client) => client,
            other => panic!("expected client, got {other:?}"),
        }
    }

    #[test]
    fn clamps_out_of_range_priority() {
        let outcome = transform_row(EntityKind::Client, &client_row("9"));
        assert_eq!(client(&outcome).priority_level, 5);
        let diagnostics = &outcome.as_ref().unwrap().diagnostics;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, IssueCode::RangeClamped);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].message.contains('9'));
        assert!(diagnostics[0].message.contains("clamped to 5"));
    }

    #[test]
    fn rounded_and_out_of_range_reports_once() {
        let outcome = transform_row(EntityKind::Client, &client_row("7.6"));
        assert_eq!(client(&outcome).priority_level, 5);
        assert_eq!(outcome.as_ref().unwrap().diagnostics.len(), 1);

        let outcome = transform_row(EntityKind::Client, &client_row("2.6"));
        assert_eq!(client(&outcome).priority_level, 3);
        assert_eq!(
            outcome.as_ref().unwrap().diagnostics[0].code,
            IssueCode::NumberRounded
        );
    }

    #[test]
    fn blank_and_invalid_numbers_default() {
        let outcome = transform_row(EntityKind::Client, &client_row(""));
        assert_eq!(client(&outcome).priority_level, 1);
        assert_eq!(
            outcome.as_ref().unwrap().diagnostics[0].severity,
            Severity::Info
        );

        let outcome = transform_row(EntityKind::Client, &client_row("high"));
        assert_eq!(client(&outcome).priority_level, 1);
        assert_eq!(
            outcome.as_ref().unwrap().diagnostics[0].code,
            IssueCode::InvalidNumber
        );
    }

    #[test]
    fn blank_id_gets_placeholder() {
        let row = MappedRow::new(4).with_cell(Field::WorkerName, "Ada");
        let outcome = transform_row(EntityKind::Worker, &row).expect("row transforms");
        assert_eq!(outcome.entity.id(), "WAUTO0005");
        let missing = outcome
            .diagnostics
            .iter()
            .find(|d| d.code == IssueCode::MissingId)
            .expect("missing id diagnostic");
        assert_eq!(missing.entity_id, "WAUTO0005");
        assert!(missing.auto_fixable);
    }

    #[test]
    fn multi_value_scalar_drops_row() {
        let row = MappedRow::new(2)
            .with_cell(Field::TaskId, "T1")
            .with_cell(Field::Duration, vec!["1".to_string(), "2".to_string()]);
        let err = transform_row(EntityKind::Task, &row).unwrap_err();
        assert_eq!(err.code, IssueCode::RowFailed);
        assert_eq!(err.field, ALL_FIELDS);
        assert_eq!(err.severity, Severity::Error);
        assert_eq!(err.entity_id, "T1");
    }

    #[test]
    fn foreign_field_drops_row() {
        let row = MappedRow::new(0)
            .with_cell(Field::TaskId, "T1")
            .with_cell(Field::ClientName, "x");
        assert!(transform_row(EntityKind::Task, &row).is_err());
    }

    #[test]
    fn from_columns_skips_unmapped() {
        let columns = [Some(Field::TaskId), None, Some(Field::TaskName)];
        let row = MappedRow::from_columns(
            1,
            &columns,
            ["T1".to_string(), "ignored".to_string(), "Build".to_string()],
        );
        assert_eq!(row.cells.len(), 2);
        assert_eq!(row.get(Field::TaskName), Some(&CellValue::Text("Build".into())));
        assert!(!row.is_blank());
        assert!(MappedRow::new(0).with_cell(Field::TaskId, "  ").is_blank());
    }
}
