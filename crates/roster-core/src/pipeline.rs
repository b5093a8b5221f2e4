//! Single-file pipeline: extract, map headers, transform.

use std::time::Instant;

use roster_ingest::{RawTable, Result, extract};
use roster_map::HeaderMapper;
use roster_model::{
    EntityKind, Field, IssueCode, ParsingResult, ValidationError, redact_value,
};
use roster_transform::{MappedRow, transform_rows};

use crate::options::PipelineOptions;
use crate::source::SourceFile;

/// Parse one uploaded file into typed entities and diagnostics.
///
/// Extraction failures reject the whole file; every other problem comes back
/// as a diagnostic inside the result.
pub fn parse_file(
    kind: EntityKind,
    file: &SourceFile,
    options: &PipelineOptions,
) -> Result<ParsingResult> {
    let _span = tracing::info_span!("parse_file", file = %file.name, kind = %kind).entered();
    let table = extract(
        &file.bytes,
        file.extension.as_deref(),
        &options.ingest_options(),
    )?;
    Ok(parse_table(kind, &file.name, &table, options))
}

/// Map and transform an already extracted table.
pub fn parse_table(
    kind: EntityKind,
    file_name: &str,
    table: &RawTable,
    options: &PipelineOptions,
) -> ParsingResult {
    let started = Instant::now();
    let policy = options.mapping_policy;

    let mapping = HeaderMapper::new(kind)
        .with_overrides(options.overrides_for(kind))
        .map_headers(&table.headers);

    let mut result = ParsingResult::new(kind, file_name);
    result.headers = table.headers.clone();
    result.total_rows = table.row_count();

    for field in mapping.missing_required(policy) {
        result.push_diagnostic(missing_column(kind, field));
    }
    for (header, field) in mapping.shadowed(policy) {
        result.push_diagnostic(
            ValidationError::new(
                IssueCode::ShadowedHeader,
                kind,
                "",
                0,
                header.as_str(),
                format!("Column '{header}' also maps to {field}; the first such column is used"),
            )
            .with_fix(format!("Remove or rename the extra {field} column")),
        );
    }

    let columns = mapping.columns(policy);
    let rows: Vec<MappedRow> = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            if tracing::enabled!(tracing::Level::TRACE) {
                for (header, value) in record.iter() {
                    tracing::trace!(row = idx, header, value = redact_value(value), "cell");
                }
            }
            MappedRow::from_columns(idx, &columns, record.iter().map(|(_, v)| v.to_string()))
        })
        .collect();

    let output = transform_rows(kind, &rows, options.parallel);
    result.extend_diagnostics(output.diagnostics());
    result.data = output.rows.into_iter().map(|row| row.entity).collect();
    result.processed_rows = result.data.len();
    result.mapped_headers = mapping.applied(policy);
    result.suggestions = mapping.suggestions;

    tracing::info!(
        rows = result.total_rows,
        entities = result.processed_rows,
        errors = result.error_count(),
        warnings = result.warning_count(),
        duration_ms = started.elapsed().as_millis() as u64,
        "parsed file"
    );
    result
}

fn missing_column(kind: EntityKind, field: Field) -> ValidationError {
    ValidationError::new(
        IssueCode::MissingColumn,
        kind,
        "",
        0,
        field.name(),
        format!("No column maps to required field {field}"),
    )
    .with_fix(format!("Rename a column to {field} or add a header override"))
}
