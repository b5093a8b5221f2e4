//! End-to-end pipeline tests over in-memory uploads.

use std::io::Write;

use roster_core::{
    BatchInput, PipelineOptions, SourceFile, parse_file, process_batch, revalidate,
};
use roster_map::MappingPolicy;
use roster_model::{Entity, EntityKind, Field, IssueCode, Severity};
use roster_report::export_csv;

const CLIENTS: &str = "\
ClientID,ClientName,PriorityLevel,RequestedTaskIDs,GroupTag,AttributesJSON
C001,Acme,3,\"T001,T002\",GroupA,\"{\"\"tier\"\":1}\"
";

const WORKERS: &str = "\
WorkerID,WorkerName,Skills,AvailableSlots,MaxLoadPerPhase,WorkerGroup,QualificationLevel
W001,Ada,\"rust;sql\",\"1,2,3\",2,GroupA,4
";

const TASKS: &str = "\
TaskID,TaskName,Category,Duration,RequiredSkills,PreferredPhases,MaxConcurrent
T001,Build,Eng,2,rust,1-2,1
T002,Report,Ops,1,sql,[3],1
";

fn csv(name: &str, content: &str) -> SourceFile {
    SourceFile::new(name, content.as_bytes().to_vec())
}

fn clean_batch() -> BatchInput {
    BatchInput::new()
        .with_file(EntityKind::Client, csv("clients.csv", CLIENTS))
        .with_file(EntityKind::Worker, csv("workers.csv", WORKERS))
        .with_file(EntityKind::Task, csv("tasks.csv", TASKS))
}

#[test]
fn test_clean_batch_has_no_diagnostics() {
    let outcome = process_batch(&clean_batch(), &PipelineOptions::default());

    assert_eq!(outcome.summary.total_files, 3);
    assert_eq!(outcome.summary.successful_files, 3);
    assert_eq!(outcome.summary.total_entities, 4);
    assert_eq!(outcome.summary.total_errors, 0);
    assert_eq!(outcome.summary.total_warnings, 0);
    assert!(outcome.validation.issues.is_empty(), "{:?}", outcome.validation.issues);
    assert_eq!(outcome.validation.score, 100);
    assert!(!outcome.has_blocking_errors());

    let tasks = &outcome.collections.tasks;
    assert_eq!(tasks[0].preferred_phases, vec![1, 2]);
    assert_eq!(tasks[1].preferred_phases, vec![3]);
    assert_eq!(outcome.collections.workers[0].skills, vec!["rust", "sql"]);
    assert_eq!(outcome.collections.clients[0].attributes_json, r#"{"tier":1}"#);
}

#[test]
fn test_priority_nine_is_clamped() {
    let file = csv(
        "clients.csv",
        "ClientID,ClientName,PriorityLevel\nC001,Acme,9\n",
    );

    let result = parse_file(EntityKind::Client, &file, &PipelineOptions::default())
        .expect("parse failed");

    let Entity::Client(client) = &result.data[0] else {
        panic!("expected a client");
    };
    assert_eq!(client.priority_level, 5);
    let clamps: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| w.code == IssueCode::RangeClamped)
        .collect();
    assert_eq!(clamps.len(), 1);
    assert!(clamps[0].message.contains("clamped to 5"));
    assert_eq!(clamps[0].field, "PriorityLevel");
}

#[test]
fn test_messy_headers_are_mapped() {
    let file = csv(
        "clients.csv",
        "Client ID,Name,Priority,Tasks,Notes\nC001,Acme,2,T001,hello\n",
    );

    let result = parse_file(EntityKind::Client, &file, &PipelineOptions::default())
        .expect("parse failed");

    assert_eq!(result.headers.len(), 5);
    assert_eq!(result.mapped_headers.get("Client ID"), Some(&Field::ClientId));
    assert_eq!(result.mapped_headers.get("Tasks"), Some(&Field::RequestedTaskIds));
    assert!(!result.mapped_headers.contains_key("Notes"));
    assert_eq!(result.suggestions.len(), 5);
    assert_eq!(result.processed_rows, 1);
}

#[test]
fn test_missing_required_column() {
    let file = csv("workers.csv", "WorkerName,Skills\nAda,rust\nGrace,cobol\n");

    let result = parse_file(EntityKind::Worker, &file, &PipelineOptions::default())
        .expect("parse failed");

    let missing: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.code == IssueCode::MissingColumn)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].field, "WorkerID");
    assert_eq!(missing[0].row, 0);

    // rows still load, each with a placeholder identifier
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.data[1].id(), "WAUTO0002");
}

#[test]
fn test_shadowed_header_reported() {
    let file = csv("tasks.csv", "TaskID,Task ID,TaskName\nT001,T999,Build\n");

    let result =
        parse_file(EntityKind::Task, &file, &PipelineOptions::default()).expect("parse failed");

    assert_eq!(result.data[0].id(), "T001");
    let shadowed: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| w.code == IssueCode::ShadowedHeader)
        .collect();
    assert_eq!(shadowed.len(), 1);
    assert_eq!(shadowed[0].field, "Task ID");
    assert_eq!(shadowed[0].severity, Severity::Info);
    assert!(!result.mapped_headers.contains_key("Task ID"));
}

#[test]
fn test_failed_file_does_not_block_others() {
    let input = clean_batch().with_file(EntityKind::Task, csv("tasks.csv", ""));

    let outcome = process_batch(&input, &PipelineOptions::default());

    assert_eq!(outcome.summary.total_files, 3);
    assert_eq!(outcome.summary.successful_files, 2);
    assert_eq!(outcome.summary.failed_files, vec!["tasks.csv".to_string()]);
    assert_eq!(outcome.failures[0].kind, EntityKind::Task);
    assert!(outcome.result(EntityKind::Task).is_none());
    assert_eq!(outcome.collections.clients.len(), 1);
    assert!(outcome.has_blocking_errors());

    // without tasks every requested reference dangles
    let dangling = outcome
        .validation
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::DanglingReference)
        .count();
    assert_eq!(dangling, 2);
}

#[test]
fn test_unreadable_path_recorded_as_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let workers = dir.path().join("workers.csv");
    std::fs::write(&workers, WORKERS).expect("write fixture");
    let options = PipelineOptions::default();

    let input = BatchInput::new()
        .with_path(EntityKind::Client, &dir.path().join("clients.csv"), options.max_file_bytes)
        .with_path(EntityKind::Worker, &workers, options.max_file_bytes);
    assert_eq!(input.unread.len(), 1);

    let outcome = process_batch(&input, &options);

    assert_eq!(outcome.summary.total_files, 2);
    assert_eq!(outcome.summary.failed_files, vec!["clients.csv".to_string()]);
    assert_eq!(outcome.failures[0].kind, EntityKind::Client);
    assert_eq!(outcome.collections.workers.len(), 1);
    assert!(outcome.has_blocking_errors());
}

#[test]
fn test_oversized_file_rejected() {
    let options = PipelineOptions::default().with_max_file_bytes(16);

    let outcome = process_batch(&clean_batch(), &options);

    assert_eq!(outcome.summary.successful_files, 0);
    assert_eq!(outcome.failures.len(), 3);
    assert!(outcome.validation.issues.is_empty());
}

#[test]
fn test_cross_file_scenarios() {
    let clients = "\
ClientID,ClientName,PriorityLevel,RequestedTaskIDs
C001,Acme,3,T999
C001,Beta,2,T001
";
    let input = clean_batch().with_file(EntityKind::Client, csv("clients.csv", clients));

    let outcome = process_batch(&input, &PipelineOptions::default());
    let issues = &outcome.validation.issues;

    let duplicates: Vec<_> = issues
        .iter()
        .filter(|i| i.code == IssueCode::DuplicateId)
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].row, 1);
    assert_eq!(duplicates[0].severity, Severity::Error);

    let dangling: Vec<_> = issues
        .iter()
        .filter(|i| i.code == IssueCode::DanglingReference)
        .collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].severity, Severity::Warning);
    assert!(dangling[0].message.contains("T999"));
}

#[test]
fn test_parallel_matches_sequential() {
    let parallel = process_batch(&clean_batch(), &PipelineOptions::default());
    let sequential = process_batch(
        &clean_batch(),
        &PipelineOptions::default().with_parallel(false),
    );

    assert_eq!(parallel.results, sequential.results);
    assert_eq!(parallel.collections, sequential.collections);
    assert_eq!(parallel.validation, sequential.validation);
}

#[test]
fn test_export_then_reingest_round_trip() {
    let first = process_batch(&clean_batch(), &PipelineOptions::default());

    for kind in EntityKind::ALL {
        let entities = first.collections.entities(kind);
        let exported = export_csv(&entities).expect("export failed");
        let file = csv(&format!("{}.csv", kind.plural()), &exported);

        let reparsed =
            parse_file(kind, &file, &PipelineOptions::default()).expect("reparse failed");

        assert_eq!(reparsed.data, entities, "{kind} round trip");
        assert!(reparsed.errors.is_empty());
        assert!(reparsed.warnings.is_empty());
    }
}

#[test]
fn test_revalidate_after_edit() {
    let outcome = process_batch(&clean_batch(), &PipelineOptions::default());
    let mut collections = outcome.collections.clone();
    collections.clients[0].requested_task_ids.push("T404".to_string());
    collections.workers[0].qualification_level = 9;

    let report = revalidate(&collections);

    assert!(report.has_errors());
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.score, 88);
}

#[test]
fn test_config_file_overrides_and_policy() {
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        config,
        r#"
parallel = false
mapping_policy = "accepted-only"

[header_overrides.client]
"Cust #" = "ClientID"
"#
    )
    .expect("write config");

    let options = PipelineOptions::from_toml_path(config.path()).expect("load config");
    assert_eq!(options.mapping_policy, MappingPolicy::AcceptedOnly);
    assert!(!options.parallel);

    let file = csv("clients.csv", "Cust #,ClientName\nC042,Acme\n");
    let result = parse_file(EntityKind::Client, &file, &options).expect("parse failed");

    assert_eq!(result.data[0].id(), "C042");
    assert_eq!(result.mapped_headers.get("Cust #"), Some(&Field::ClientId));
    assert!(result.errors.is_empty());
}

#[test]
fn test_invalid_config_reports_path() {
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(config, "parallel = \"sometimes\"").expect("write config");

    let error = PipelineOptions::from_toml_path(config.path()).unwrap_err();

    assert!(error.to_string().contains("failed to parse config"));
}
