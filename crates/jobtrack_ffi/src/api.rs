//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level tracker functions to the UI via FRB.
//! - Convert core errors into simple envelopes the UI can render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the store fresh; calls are serialized process-wide.
//! - Lookup misses are reported as `None`, not as errors.

use chrono::{NaiveDate, Utc};
use jobtrack_core::db::open_db;
use jobtrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    parse_application_date, ping as ping_inner, write_export, JobApplication, JobDraft, JobStatus,
    JobStore, JobValidationError, SqliteKeyValueRepository, StatusFilter, StoreError,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

const DB_FILE_NAME: &str = "jobtrack.sqlite3";
const DB_PATH_ENV: &str = "JOBTRACK_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Form input for add/edit flows.
///
/// Blank optional fields are stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobInput {
    pub company_name: String,
    pub job_title: String,
    /// `Applied|Interviewing|Offer|Rejected`; blank means `Applied`.
    pub status: String,
    /// `YYYY-MM-DD`.
    pub application_date: String,
    pub notes: String,
    pub salary: Option<String>,
    pub location: Option<String>,
    pub job_url: Option<String>,
    pub contact_email: Option<String>,
}

/// Record projection for UI display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobItem {
    pub id: String,
    pub company_name: String,
    pub job_title: String,
    pub status: String,
    pub application_date: String,
    pub notes: String,
    pub salary: Option<String>,
    pub location: Option<String>,
    pub job_url: Option<String>,
    pub contact_email: Option<String>,
    /// RFC 3339 UTC.
    pub created_at: String,
    /// RFC 3339 UTC.
    pub updated_at: String,
}

/// Inline validation message for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorItem {
    /// camelCase field name (`companyName`, `contactEmail`, ...).
    pub field: String,
    pub message: String,
}

/// Result envelope for single-record mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobActionResponse {
    pub ok: bool,
    /// Record after the mutation, when one exists.
    pub job: Option<JobItem>,
    /// Per-field validation failures; empty unless validation failed.
    pub field_errors: Vec<FieldErrorItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl JobActionResponse {
    fn success(message: impl Into<String>, job: Option<JobItem>) -> Self {
        Self {
            ok: true,
            job,
            field_errors: Vec::new(),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            job: None,
            field_errors: Vec::new(),
            message: message.into(),
        }
    }

    fn invalid(err: &JobValidationError) -> Self {
        Self {
            ok: false,
            job: None,
            field_errors: err
                .violations
                .iter()
                .map(|violation| FieldErrorItem {
                    field: violation.field.as_str().to_string(),
                    message: violation.message.to_string(),
                })
                .collect(),
            message: err.to_string(),
        }
    }

    fn from_store_error(operation: &str, err: StoreError) -> Self {
        match err {
            StoreError::Validation(err) => Self::invalid(&err),
            other => Self::failure(format!("{operation} failed: {other}")),
        }
    }
}

/// Filtered list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListResponse {
    /// Items sorted by application date, newest first.
    pub items: Vec<JobItem>,
    /// Size of the unfiltered collection.
    pub total: u32,
    pub message: String,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStatsResponse {
    pub total: u32,
    pub applied: u32,
    pub interviewing: u32,
    pub offer: u32,
    pub rejected: u32,
}

/// Result envelope for export/import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResponse {
    pub ok: bool,
    /// Written export path; `None` for imports and failures.
    pub path: Option<String>,
    /// Records exported or imported.
    pub count: u32,
    pub message: String,
}

impl TransferResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            path: None,
            count: 0,
            message: message.into(),
        }
    }
}

/// Validates form input and creates a record.
///
/// # FFI contract
/// - Never panics.
/// - Validation failures come back in `field_errors` with no state change.
#[flutter_rust_bridge::frb(sync)]
pub fn job_add(input: JobInput) -> JobActionResponse {
    let draft = match build_draft(input) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    match with_store(|store| store.add(draft)) {
        Ok(Ok(job)) => JobActionResponse::success("Job added.", Some(to_job_item(&job))),
        Ok(Err(err)) => JobActionResponse::from_store_error("job_add", err),
        Err(message) => JobActionResponse::failure(message),
    }
}

/// Replaces the editable fields of one record.
///
/// Returns `ok=false` with a not-found message when `id` is unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn job_update(id: String, input: JobInput) -> JobActionResponse {
    let draft = match build_draft(input) {
        Ok(draft) => draft,
        Err(response) => return response,
    };
    let result = with_store(|store| {
        let Some(existing) = store.get(&id).cloned() else {
            return Err(StoreError::NotFound(id.clone()));
        };
        let edited = JobApplication::with_id(existing.id, draft, existing.created_at);
        store.update(edited)
    });
    match result {
        Ok(Ok(job)) => JobActionResponse::success("Job updated.", Some(to_job_item(&job))),
        Ok(Err(err)) => JobActionResponse::from_store_error("job_update", err),
        Err(message) => JobActionResponse::failure(message),
    }
}

/// Changes only the status of one record.
#[flutter_rust_bridge::frb(sync)]
pub fn job_update_status(id: String, status: String) -> JobActionResponse {
    let status = match status.trim().parse::<JobStatus>() {
        Ok(status) => status,
        Err(err) => return JobActionResponse::failure(format!("job_update_status failed: {err}")),
    };
    match with_store(|store| store.update_status(&id, status)) {
        Ok(Ok(job)) => JobActionResponse::success("Status updated.", Some(to_job_item(&job))),
        Ok(Err(err)) => JobActionResponse::from_store_error("job_update_status", err),
        Err(message) => JobActionResponse::failure(message),
    }
}

/// Deletes one record. Deleting an unknown id succeeds without change.
#[flutter_rust_bridge::frb(sync)]
pub fn job_delete(id: String) -> JobActionResponse {
    match with_store(|store| store.delete(&id)) {
        Ok(true) => JobActionResponse::success("Job deleted.", None),
        Ok(false) => JobActionResponse::success("Job already deleted.", None),
        Err(message) => JobActionResponse::failure(message),
    }
}

/// Gets one record for detail/edit views; `None` means "not found".
#[flutter_rust_bridge::frb(sync)]
pub fn job_get(id: String) -> Option<JobItem> {
    match with_store(|store| store.get(&id).map(to_job_item)) {
        Ok(item) => item,
        Err(message) => {
            warn!("event=job_get module=ffi status=error error={message}");
            None
        }
    }
}

/// Lists records matching `search` and `status` (`all` or a status name).
#[flutter_rust_bridge::frb(sync)]
pub fn jobs_list(search: String, status: String) -> JobListResponse {
    let filter = match status.trim() {
        "" => StatusFilter::All,
        raw => match raw.parse::<StatusFilter>() {
            Ok(filter) => filter,
            Err(err) => {
                return JobListResponse {
                    items: Vec::new(),
                    total: 0,
                    message: format!("jobs_list failed: {err}"),
                }
            }
        },
    };

    let result = with_store(|store| {
        store.set_search_term(search);
        store.set_status_filter(filter);
        let items = store.filtered().iter().map(to_job_item).collect::<Vec<_>>();
        (items, to_u32(store.len()))
    });

    match result {
        Ok((items, total)) => {
            let message = if items.is_empty() {
                "No job applications.".to_string()
            } else {
                format!("Found {} job application(s).", items.len())
            };
            JobListResponse {
                items,
                total,
                message,
            }
        }
        Err(message) => JobListResponse {
            items: Vec::new(),
            total: 0,
            message,
        },
    }
}

/// Returns per-status counters; zeroes when storage cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn jobs_stats() -> JobStatsResponse {
    match with_store(|store| store.stats()) {
        Ok(stats) => JobStatsResponse {
            total: to_u32(stats.total),
            applied: to_u32(stats.applied),
            interviewing: to_u32(stats.interviewing),
            offer: to_u32(stats.offer),
            rejected: to_u32(stats.rejected),
        },
        Err(message) => {
            warn!("event=jobs_stats module=ffi status=error error={message}");
            JobStatsResponse::default()
        }
    }
}

/// Writes `job-applications-<today>.json` into `dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn jobs_export(dir: String) -> TransferResponse {
    let today = Utc::now().date_naive();
    let result = with_store(|store| {
        write_export(Path::new(dir.trim()), store.jobs(), today)
            .map(|path| (path, to_u32(store.len())))
    });
    match result {
        Ok(Ok((path, count))) => TransferResponse {
            ok: true,
            path: Some(path.display().to_string()),
            count,
            message: "Jobs exported successfully!".to_string(),
        },
        Ok(Err(err)) => TransferResponse::failure(format!("jobs_export failed: {err}")),
        Err(message) => TransferResponse::failure(message),
    }
}

/// Replaces the whole collection with the records in the file at `path`.
///
/// Invalid files leave the collection untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn jobs_import(path: String) -> TransferResponse {
    match with_store(|store| store.import_file(Path::new(path.trim()))) {
        Ok(Ok(count)) => TransferResponse {
            ok: true,
            path: None,
            count: to_u32(count),
            message: "Jobs imported successfully!".to_string(),
        },
        Ok(Err(err)) => TransferResponse::failure(format!("Error importing jobs: {err}")),
        Err(message) => TransferResponse::failure(message),
    }
}

/// Returns the persisted dark-mode flag.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> bool {
    with_store(|store| store.is_dark_mode()).unwrap_or(false)
}

/// Flips the dark-mode flag and returns the new value.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> bool {
    match with_store(|store| store.toggle_theme()) {
        Ok(dark_mode) => dark_mode,
        Err(message) => {
            warn!("event=theme_toggle module=ffi status=error error={message}");
            false
        }
    }
}

fn build_draft(input: JobInput) -> Result<JobDraft, JobActionResponse> {
    let status = match input.status.trim() {
        "" => JobStatus::default(),
        raw => raw
            .parse::<JobStatus>()
            .map_err(|err| JobActionResponse::failure(err.to_string()))?,
    };
    let date = parse_application_date(&input.application_date);

    let draft = JobDraft {
        company_name: input.company_name.trim().to_string(),
        job_title: input.job_title.trim().to_string(),
        status,
        application_date: date.as_ref().copied().unwrap_or(NaiveDate::MIN),
        notes: input.notes,
        salary: normalize_optional(input.salary),
        location: normalize_optional(input.location),
        job_url: normalize_optional(input.job_url),
        contact_email: normalize_optional(input.contact_email),
    };

    let mut violations = match date {
        Ok(_) => Vec::new(),
        Err(err) => err.violations,
    };
    if let Err(err) = draft.validate() {
        violations.extend(err.violations);
    }
    if !violations.is_empty() {
        return Err(JobActionResponse::invalid(&JobValidationError { violations }));
    }
    Ok(draft)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(
    f: impl FnOnce(&mut JobStore<SqliteKeyValueRepository<'_>>) -> T,
) -> Result<T, String> {
    let _guard = STORE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("tracker DB open failed: {err}"))?;
    let mut store = JobStore::open(SqliteKeyValueRepository::new(&conn));
    Ok(f(&mut store))
}

fn to_job_item(job: &JobApplication) -> JobItem {
    JobItem {
        id: job.id.clone(),
        company_name: job.company_name.clone(),
        job_title: job.job_title.clone(),
        status: job.status.as_str().to_string(),
        application_date: job.application_date.format("%Y-%m-%d").to_string(),
        notes: job.notes.clone(),
        salary: job.salary.clone(),
        location: job.location.clone(),
        job_url: job.job_url.clone(),
        contact_email: job.contact_email.clone(),
        created_at: job.created_at.to_rfc3339(),
        updated_at: job.updated_at.to_rfc3339(),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
