use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use roster_model::{Severity, ValidationError};

use crate::commands::{CheckResult, ExportResult};

pub fn print_check_summary(result: &CheckResult) {
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Entities"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for parsed in &result.outcome.results {
        table.add_row(vec![
            kind_cell(parsed.kind.plural()),
            Cell::new(&parsed.file_name),
            Cell::new(parsed.total_rows),
            Cell::new(parsed.processed_rows),
            count_cell(parsed.error_count(), Color::Red),
            count_cell(parsed.warning_count(), Color::Yellow),
        ]);
    }
    for failure in &report.failures {
        table.add_row(vec![
            kind_cell(failure.kind.plural()),
            Cell::new(&failure.file_name),
            Cell::new("FAILED").fg(Color::Red).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    let validation = &report.validation;
    table.add_row(vec![
        Cell::new("validation")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("all files"),
        dim_cell("-"),
        Cell::new(result.outcome.collections.total()),
        count_cell(validation.error_count(), Color::Red),
        count_cell(validation.warning_count(), Color::Yellow),
    ]);
    println!("{table}");

    print_issue_table(&report.errors, &report.warnings);
    for failure in &report.failures {
        eprintln!("- {}: {}", failure.file_name, failure.message);
    }
    println!("Quality score: {}/100", report.score);
    if let Some(path) = &result.json_report {
        println!("Report: {}", path.display());
    }
    if result.blocked {
        eprintln!("Blocking errors found; resolve them or pass --allow-errors.");
    }
}

/// Export writes CSV to stdout, so its summary goes to stderr.
pub fn print_export_summary(result: &ExportResult) {
    let parsed = &result.parsed;
    eprintln!(
        "{}: {} of {} row(s) exported, {} error(s), {} warning(s)",
        parsed.file_name,
        parsed.processed_rows,
        parsed.total_rows,
        parsed.error_count(),
        parsed.warning_count()
    );
    if let Some(path) = &result.output {
        eprintln!("Output: {}", path.display());
    }
}

fn print_issue_table(errors: &[ValidationError], warnings: &[ValidationError]) {
    if errors.is_empty() && warnings.is_empty() {
        return;
    }
    let mut issues: Vec<&ValidationError> = errors.iter().chain(warnings).collect();
    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then(a.entity_type.cmp(&b.entity_type))
            .then(a.row.cmp(&b.row))
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Kind"),
        header_cell("Entity"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Code"),
        header_cell("Message"),
        header_cell("Fix"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.entity_type),
            text_or_dash(&issue.entity_id),
            // rows are shown 1-based, like spreadsheet data rows
            Cell::new(issue.row + 1),
            Cell::new(&issue.field),
            Cell::new(issue.code),
            Cell::new(&issue.message),
            issue
                .suggested_fix
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(18)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn kind_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn text_or_dash(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
