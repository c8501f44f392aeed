use chrono::{NaiveDate, Utc};
use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    export_jobs_json, parse_import, write_export, ImportError, JobDraft, JobStatus, JobStore,
    SqliteKeyValueRepository, StoreError,
};
use serde_json::Value;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_store(conn: &rusqlite::Connection) -> JobStore<SqliteKeyValueRepository<'_>> {
    let mut store = JobStore::open(SqliteKeyValueRepository::new(conn));
    let mut first = JobDraft::new("Acme Corp", "Engineer", date(2024, 1, 1));
    first.location = Some("Remote".to_string());
    first.contact_email = Some("hr@acme.test".to_string());
    first.notes = "referral".to_string();
    let first = store.add(first).unwrap();
    store.update_status(&first.id, JobStatus::Interviewing).unwrap();
    store
        .add(JobDraft::new("Globex", "Designer", date(2024, 3, 15)))
        .unwrap();
    store
}

#[test]
fn export_then_import_reproduces_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = seeded_store(&conn);

    let text = store.export_json().unwrap();
    let imported = parse_import(&text, Utc::now()).unwrap();

    assert_eq!(imported, store.jobs());
}

#[test]
fn export_is_pretty_printed_with_two_space_indent() {
    let conn = open_db_in_memory().unwrap();
    let store = seeded_store(&conn);

    let text = export_jobs_json(store.jobs()).unwrap();
    assert!(text.starts_with("[\n  {\n    \""));
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn write_export_creates_dated_artifact() {
    let conn = open_db_in_memory().unwrap();
    let store = seeded_store(&conn);
    let dir = tempfile::tempdir().unwrap();

    let path = write_export(dir.path(), store.jobs(), date(2024, 6, 9)).unwrap();

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("job-applications-2024-06-09.json")
    );
    let body = std::fs::read_to_string(&path).unwrap();
    assert_eq!(body, store.export_json().unwrap());
}

#[test]
fn write_export_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = write_export(&missing, &[], date(2024, 6, 9));
    assert!(result.is_err());
}

#[test]
fn import_with_one_malformed_element_leaves_store_intact() {
    let conn = open_db_in_memory().unwrap();
    let mut store = seeded_store(&conn);
    let before = store.jobs().to_vec();

    let text = r#"[
        {"id":"a","companyName":"Foo","jobTitle":"Dev","status":"Applied","applicationDate":"2024-01-01"},
        {"id":"b","companyName":"Bar","status":"Offer","applicationDate":"2024-02-01"}
    ]"#;
    let err = store.import_json(text).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Import(ImportError::MissingField {
            index: 1,
            field: "jobTitle"
        })
    ));
    assert_eq!(store.jobs(), before.as_slice());
}

#[test]
fn import_rejects_syntax_errors_unknown_status_and_duplicate_ids() {
    let now = Utc::now();

    let err = parse_import("[{", now).unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));
    assert!(err.to_string().contains("failed to parse JSON file"));

    let unknown_status = r#"[{"id":"a","companyName":"Foo","jobTitle":"Dev","status":"Ghosted","applicationDate":"2024-01-01"}]"#;
    assert!(matches!(
        parse_import(unknown_status, now).unwrap_err(),
        ImportError::InvalidRecord { index: 0, .. }
    ));

    let bad_date = r#"[{"id":"a","companyName":"Foo","jobTitle":"Dev","status":"Offer","applicationDate":"January"}]"#;
    assert!(matches!(
        parse_import(bad_date, now).unwrap_err(),
        ImportError::InvalidRecord { index: 0, .. }
    ));

    let duplicate = r#"[
        {"id":"a","companyName":"Foo","jobTitle":"Dev","status":"Applied","applicationDate":"2024-01-01"},
        {"id":"a","companyName":"Bar","jobTitle":"Ops","status":"Applied","applicationDate":"2024-01-02"}
    ]"#;
    assert!(matches!(
        parse_import(duplicate, now).unwrap_err(),
        ImportError::DuplicateId(ref id) if id == "a"
    ));
}

#[test]
fn import_replaces_collection_instead_of_merging() {
    let conn = open_db_in_memory().unwrap();
    let mut store = seeded_store(&conn);

    let text = r#"[{"id":"only","companyName":"Initech","jobTitle":"Analyst","status":"Rejected","applicationDate":"2023-12-24","createdAt":"2023-12-24T09:00:00Z","updatedAt":"2023-12-20T09:00:00Z"}]"#;
    let count = store.import_json(text).unwrap();

    assert_eq!(count, 1);
    assert_eq!(store.len(), 1);
    let job = store.get("only").unwrap();
    assert_eq!(job.status, JobStatus::Rejected);
    assert_eq!(job.updated_at, job.created_at);
}

#[test]
fn import_file_reads_artifact_from_disk() {
    let conn = open_db_in_memory().unwrap();
    let source = seeded_store(&conn);
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), source.jobs(), date(2024, 6, 9)).unwrap();

    let target_conn = open_db_in_memory().unwrap();
    let mut target = JobStore::open(SqliteKeyValueRepository::new(&target_conn));
    assert_eq!(target.import_file(&path).unwrap(), 2);
    assert_eq!(target.jobs(), source.jobs());

    let err = target
        .import_file(&dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Import(ImportError::Read { .. })));
    assert_eq!(target.len(), 2);
}
