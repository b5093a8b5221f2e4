use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use roster_core::{BatchInput, BatchOutcome, PipelineOptions, SourceFile, parse_file, process_batch};
use roster_map::{ALIAS_TABLE_VERSION, MappingPolicy, aliases_for};
use roster_model::{EntityKind, Field, FieldType, ParsingResult};
use roster_report::{DiagnosticsReport, export_csv_to_writer};

use crate::cli::{CheckArgs, ExportArgs, PipelineArgs, SchemaArgs};
use crate::summary::apply_table_style;

/// Result of `roster check`.
#[derive(Debug)]
pub struct CheckResult {
    pub outcome: BatchOutcome,
    pub report: DiagnosticsReport,
    pub json_report: Option<PathBuf>,
    /// Blocking errors were found and not explicitly allowed.
    pub blocked: bool,
}

/// Result of `roster export`.
#[derive(Debug)]
pub struct ExportResult {
    pub parsed: ParsingResult,
    pub output: Option<PathBuf>,
}

/// Config file first, then command-line flags on top.
pub fn pipeline_options(args: &PipelineArgs) -> Result<PipelineOptions> {
    let mut options = match &args.config {
        Some(path) => PipelineOptions::from_toml_path(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PipelineOptions::default(),
    };
    if let Some(max_bytes) = args.max_bytes {
        options = options.with_max_file_bytes(max_bytes);
    }
    if args.accepted_only {
        options = options.with_mapping_policy(MappingPolicy::AcceptedOnly);
    }
    if args.sequential {
        options = options.with_parallel(false);
    }
    Ok(options)
}

/// Guess the kind of a positional input from its file name.
pub fn kind_from_path(path: &Path) -> Option<EntityKind> {
    let stem = path.file_stem()?.to_string_lossy().to_lowercase();
    EntityKind::ALL
        .into_iter()
        .find(|kind| stem.contains(kind.as_str()))
}

fn read_source(path: &Path, options: &PipelineOptions) -> Result<SourceFile> {
    SourceFile::from_path(path, options.max_file_bytes)
        .with_context(|| format!("read {}", path.display()))
}

/// Unreadable files become failures for their kind; usage errors abort.
fn batch_input(args: &CheckArgs, options: &PipelineOptions) -> Result<BatchInput> {
    let mut named: Vec<(EntityKind, &PathBuf)> = Vec::new();
    for path in &args.files {
        let kind = kind_from_path(path).with_context(|| {
            format!(
                "cannot tell the entity kind of {}; use --clients, --workers or --tasks",
                path.display()
            )
        })?;
        named.push((kind, path));
    }
    let flagged = [
        (EntityKind::Client, args.clients.as_ref()),
        (EntityKind::Worker, args.workers.as_ref()),
        (EntityKind::Task, args.tasks.as_ref()),
    ];
    named.extend(
        flagged
            .into_iter()
            .filter_map(|(kind, path)| path.map(|p| (kind, p))),
    );

    if named.is_empty() {
        bail!("no input files given");
    }
    let mut input = BatchInput::new();
    let mut seen = Vec::new();
    for (kind, path) in named {
        if seen.contains(&kind) {
            bail!("more than one {kind} file given");
        }
        seen.push(kind);
        input = input.with_path(kind, path, options.max_file_bytes);
    }
    Ok(input)
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let started = Instant::now();
    let span = info_span!("check");
    let _guard = span.enter();

    let options = pipeline_options(&args.pipeline)?;
    let input = batch_input(args, &options)?;
    let outcome = process_batch(&input, &options);
    let report = DiagnosticsReport::build(
        &outcome.results,
        &outcome.failures,
        &outcome.summary,
        &outcome.validation,
    );

    if let Some(path) = &args.json {
        let json = report.to_json_pretty().context("serialize report")?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "wrote diagnostics report");
    }

    let blocked = report.has_blocking_errors() && !args.pipeline.allow_errors;
    info!(
        score = report.score,
        blocked,
        duration_ms = started.elapsed().as_millis() as u64,
        "check complete"
    );
    Ok(CheckResult {
        outcome,
        report,
        json_report: args.json.clone(),
        blocked,
    })
}

/// Apply `--map HEADER=FIELD` entries on top of the configured overrides.
fn with_header_maps(
    mut options: PipelineOptions,
    kind: EntityKind,
    maps: &[String],
) -> Result<PipelineOptions> {
    for entry in maps {
        let Some((header, name)) = entry.split_once('=') else {
            bail!("--map expects HEADER=FIELD, got '{entry}'");
        };
        let field = Field::from_name(kind, name.trim())
            .with_context(|| format!("--map {entry}"))?;
        options = options.with_header_override(kind, header.trim(), field);
    }
    Ok(options)
}

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let kind = EntityKind::from(args.kind);
    let span = info_span!("export", kind = %kind);
    let _guard = span.enter();

    let options = with_header_maps(pipeline_options(&args.pipeline)?, kind, &args.map)?;
    let source = read_source(&args.file, &options)?;
    let parsed = parse_file(kind, &source, &options)
        .with_context(|| format!("parse {}", args.file.display()))?;

    if parsed.has_errors() && !args.pipeline.allow_errors {
        bail!(
            "{} has {} blocking error(s); fix them or pass --allow-errors",
            args.file.display(),
            parsed.error_count()
        );
    }

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            export_csv_to_writer(&parsed.data, BufWriter::new(file))
                .with_context(|| format!("write {}", path.display()))?;
        }
        None => {
            export_csv_to_writer(&parsed.data, io::stdout().lock()).context("write stdout")?;
        }
    }

    Ok(ExportResult {
        parsed,
        output: args.output.clone(),
    })
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let kinds: Vec<EntityKind> = match args.kind {
        Some(kind) => vec![kind.into()],
        None => EntityKind::ALL.to_vec(),
    };
    println!("Alias table version {ALIAS_TABLE_VERSION}");
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Field", "Type", "Required", "Aliases"]);
    apply_table_style(&mut table);
    for kind in kinds {
        let required = Field::required(kind);
        for field in Field::for_kind(kind) {
            let aliases: Vec<&str> = aliases_for(*field)
                .filter(|alias| *alias != field.name())
                .collect();
            table.add_row(vec![
                kind.to_string(),
                field.name().to_string(),
                type_label(field.field_type()),
                if required.contains(field) { "yes" } else { "" }.to_string(),
                aliases.join(", "),
            ]);
        }
    }
    println!("{table}");
    Ok(())
}

fn type_label(field_type: FieldType) -> String {
    match field_type {
        FieldType::Id => "id".to_string(),
        FieldType::Text => "text".to_string(),
        FieldType::Int { min, max } => format!("integer {min}-{max}"),
        FieldType::IntList { min, max } => format!("integer list {min}-{max}"),
        FieldType::TextList => "text list".to_string(),
        FieldType::Json => "json".to_string(),
    }
}
