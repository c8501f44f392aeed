//! Core domain logic for the job application tracker.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::job::{
    parse_application_date, FieldViolation, JobApplication, JobDraft, JobField, JobId, JobStatus,
    JobValidationError, UnknownStatus,
};
pub use repo::kv_repo::{KeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository};
pub use service::job_store::{JobStore, StoreError, StoreResult};
pub use storage::export::{export_file_name, export_jobs_json, write_export, ExportError};
pub use storage::import::{import_jobs_from_file, parse_import, read_import_file, ImportError};
pub use storage::job_storage::{JobStorage, StorageError, JOBS_STORAGE_KEY, THEME_STORAGE_KEY};
pub use view::filter::{filter_jobs, job_stats, JobStats, StatusFilter};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
