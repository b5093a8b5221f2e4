use roster_model::{Client, EntityCollections, EntityKind, IssueCode, Severity, Task, Worker};
use roster_validate::validate;

fn client(id: &str, tasks: &[&str]) -> Client {
    Client {
        client_id: id.to_string(),
        client_name: format!("Client {id}"),
        priority_level: 3,
        requested_task_ids: tasks.iter().map(|t| (*t).to_string()).collect(),
        group_tag: "A".to_string(),
        attributes_json: "{}".to_string(),
    }
}

fn worker(id: &str, skills: &[&str], slots: &[i64], max_load: i64) -> Worker {
    Worker {
        worker_id: id.to_string(),
        worker_name: format!("Worker {id}"),
        skills: skills.iter().map(|s| (*s).to_string()).collect(),
        available_slots: slots.to_vec(),
        max_load_per_phase: max_load,
        worker_group: "Core".to_string(),
        qualification_level: 3,
    }
}

fn task(id: &str, skills: &[&str], phases: &[i64], duration: i64, max_concurrent: i64) -> Task {
    Task {
        task_id: id.to_string(),
        task_name: format!("Task {id}"),
        category: "Eng".to_string(),
        duration,
        required_skills: skills.iter().map(|s| (*s).to_string()).collect(),
        preferred_phases: phases.to_vec(),
        max_concurrent,
    }
}

fn clean_collections() -> EntityCollections {
    EntityCollections {
        clients: vec![client("C1", &["T1"]), client("C2", &["T1", "T2"])],
        workers: vec![
            worker("W1", &["rust", "sql"], &[1, 2, 3], 2),
            worker("W2", &["Rust"], &[1, 2], 2),
        ],
        tasks: vec![
            task("T1", &["rust"], &[1], 1, 2),
            task("T2", &["SQL"], &[2], 1, 1),
        ],
    }
}

fn codes(report: &roster_validate::ValidationReport, code: IssueCode) -> usize {
    report.issues.iter().filter(|i| i.code == code).count()
}

#[test]
fn clean_data_scores_full_marks() {
    let report = validate(&clean_collections());
    assert!(report.issues.is_empty(), "{:#?}", report.issues);
    assert_eq!(report.score, 100);
    assert!(!report.has_errors());
}

#[test]
fn second_duplicate_is_the_only_error() {
    let mut collections = clean_collections();
    collections.clients = vec![client("C001", &[]), client("C001", &[])];
    let report = validate(&collections);

    let duplicates: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::DuplicateId)
        .collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].severity, Severity::Error);
    assert_eq!(duplicates[0].row, 1);
    assert_eq!(duplicates[0].entity_id, "C001");
}

#[test]
fn blank_ids_collide_after_manual_edit() {
    let mut collections = clean_collections();
    collections.workers[0].worker_id = String::new();
    collections.workers[1].worker_id = "  ".to_string();
    let report = validate(&collections);

    assert_eq!(codes(&report, IssueCode::DuplicateId), 1);
    let duplicate = report
        .issues
        .iter()
        .find(|i| i.code == IssueCode::DuplicateId)
        .expect("duplicate reported");
    assert_eq!(duplicate.entity_type, EntityKind::Worker);
    assert_eq!(duplicate.row, 1);
    assert!(duplicate.message.starts_with("Blank WorkerID"));
    assert!(report.has_errors());
}

#[test]
fn n_occurrences_give_n_minus_one_errors() {
    let mut collections = clean_collections();
    collections.tasks.extend((0..4).map(|_| task("T1", &["rust"], &[1], 1, 1)));
    let report = validate(&collections);
    assert_eq!(codes(&report, IssueCode::DuplicateId), 4);
    assert_eq!(report.counts_for(EntityKind::Task).errors, 4);
}

#[test]
fn dangling_reference_is_a_single_warning() {
    let mut collections = clean_collections();
    collections.clients.push(client("C3", &["T999"]));
    let report = validate(&collections);

    let dangling: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::DanglingReference)
        .collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].severity, Severity::Warning);
    assert!(!dangling[0].auto_fixable);
    assert!(dangling[0].message.contains("T999"));
    assert_eq!(report.score, 98);
}

#[test]
fn out_of_range_edits_are_errors() {
    let mut collections = clean_collections();
    collections.clients[0].priority_level = 9;
    collections.workers[0].available_slots = vec![1, 2, 30];
    let report = validate(&collections);
    assert_eq!(codes(&report, IssueCode::OutOfRange), 2);
    assert!(report
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::OutOfRange)
        .all(|i| i.severity == Severity::Error && i.auto_fixable));
}

#[test]
fn malformed_json_and_empty_skills() {
    let mut collections = clean_collections();
    collections.clients[0].attributes_json = "{invalid}".to_string();
    collections.workers[1].skills.clear();
    let report = validate(&collections);
    assert_eq!(codes(&report, IssueCode::InvalidJson), 1);
    assert_eq!(codes(&report, IssueCode::EmptyList), 1);
}

#[test]
fn id_prefix_convention() {
    let mut collections = clean_collections();
    collections.workers[0].worker_id = "X1".to_string();
    let report = validate(&collections);
    let prefix: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::IdPrefix)
        .collect();
    assert_eq!(prefix.len(), 1);
    assert_eq!(prefix[0].entity_type, EntityKind::Worker);
}

#[test]
fn capacity_checks() {
    let collections = EntityCollections {
        clients: Vec::new(),
        workers: vec![
            worker("W1", &["rust"], &[1], 3),
            worker("W2", &["rust"], &[1], 1),
        ],
        tasks: vec![
            task("T1", &["rust"], &[1], 5, 4),
            task("T2", &["cobol"], &[2], 1, 1),
        ],
    };
    let report = validate(&collections);

    // W1 declares a load of 3 with a single slot
    assert_eq!(codes(&report, IssueCode::OverloadedWorker), 1);
    // nobody knows cobol
    assert_eq!(codes(&report, IssueCode::UncoveredSkill), 1);
    // T1 wants 4 concurrent workers, only 2 qualify
    let concurrency = report
        .issues
        .iter()
        .find(|i| i.code == IssueCode::ConcurrencyInfeasible)
        .expect("concurrency warning");
    assert_eq!(concurrency.suggested_fix.as_deref(), Some("Lower MaxConcurrent to 2"));
    // phase 1: demand 5 > capacity 4; phase 2: demand 1 > capacity 0
    let saturated: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.code == IssueCode::PhaseSaturated)
        .collect();
    assert_eq!(saturated.len(), 2);
    assert!(saturated.iter().all(|i| i.severity == Severity::Info));
}

#[test]
fn capacity_checks_skip_without_workers() {
    let collections = EntityCollections {
        clients: Vec::new(),
        workers: Vec::new(),
        tasks: vec![task("T1", &["cobol"], &[1], 5, 5)],
    };
    let report = validate(&collections);
    assert_eq!(codes(&report, IssueCode::UncoveredSkill), 0);
    assert_eq!(codes(&report, IssueCode::PhaseSaturated), 0);
}
