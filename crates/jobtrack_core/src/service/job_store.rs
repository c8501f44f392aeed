//! Record store: the single owner of tracker state.
//!
//! # Responsibility
//! - Hold the ordered record collection plus list/theme UI state.
//! - Apply add/update/delete/import mutations with system-managed fields.
//! - Persist the full collection after every mutation.
//!
//! # Invariants
//! - Record ids are unique within the collection.
//! - `created_at` is never rewritten by update paths.
//! - `updated_at` never moves backwards.
//! - Persistence is best-effort: a failed write does not undo the mutation.
//! - Failed validation or import leaves state untouched.

use crate::model::job::{JobApplication, JobDraft, JobId, JobStatus, JobValidationError};
use crate::repo::kv_repo::KeyValueRepository;
use crate::storage::export::{export_jobs_json, ExportError};
use crate::storage::import::{import_jobs_from_file, parse_import, ImportError};
use crate::storage::job_storage::JobStorage;
use crate::view::filter::{filter_jobs, job_stats, JobStats, StatusFilter};
use chrono::Utc;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure for mutation requests.
#[derive(Debug)]
pub enum StoreError {
    /// Draft fields failed form rules.
    Validation(JobValidationError),
    /// Target record does not exist.
    NotFound(JobId),
    /// Import artifact was rejected; the collection is unchanged.
    Import(ImportError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "job application not found: {id}"),
            Self::Import(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Import(err) => Some(err),
        }
    }
}

impl From<JobValidationError> for StoreError {
    fn from(value: JobValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImportError> for StoreError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Explicit tracker state container over a persistence adapter.
pub struct JobStore<R: KeyValueRepository> {
    storage: JobStorage<R>,
    jobs: Vec<JobApplication>,
    search_term: String,
    status_filter: StatusFilter,
    dark_mode: bool,
}

impl<R: KeyValueRepository> JobStore<R> {
    /// Opens the store, loading records and theme flag from `repo`.
    ///
    /// Unreadable stored values load as defaults; this never fails.
    pub fn open(repo: R) -> Self {
        let storage = JobStorage::new(repo);
        let jobs = storage.load_jobs();
        let dark_mode = storage.load_dark_mode();
        Self {
            storage,
            jobs,
            search_term: String::new(),
            status_filter: StatusFilter::All,
            dark_mode,
        }
    }

    /// Full collection in insertion order.
    pub fn jobs(&self) -> &[JobApplication] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Creates a record from a validated draft.
    ///
    /// # Contract
    /// - Generates a fresh id not used by any existing record.
    /// - Sets `created_at == updated_at`.
    /// - Returns the stored record.
    pub fn add(&mut self, draft: JobDraft) -> StoreResult<JobApplication> {
        draft.validate()?;

        let mut job = JobApplication::from_draft(draft, Utc::now());
        // Imported ids are arbitrary strings and may collide with UUID text.
        while self.index_of(&job.id).is_some() {
            job.id = Uuid::new_v4().to_string();
        }

        self.jobs.push(job.clone());
        self.persist();
        Ok(job)
    }

    /// Replaces the record with the same id.
    ///
    /// # Contract
    /// - Keeps the stored `created_at`; the caller's value is ignored.
    /// - Refreshes `updated_at`.
    /// - Returns `NotFound` when no record has `job.id`.
    pub fn update(&mut self, mut job: JobApplication) -> StoreResult<JobApplication> {
        let Some(index) = self.index_of(&job.id) else {
            return Err(StoreError::NotFound(job.id));
        };
        job.to_draft().validate()?;

        let current = &self.jobs[index];
        job.created_at = current.created_at;
        job.updated_at = current.updated_at;
        job.touch(Utc::now());

        self.jobs[index] = job.clone();
        self.persist();
        Ok(job)
    }

    /// Changes only the status of one record and refreshes `updated_at`.
    pub fn update_status(&mut self, id: &str, status: JobStatus) -> StoreResult<JobApplication> {
        let Some(index) = self.index_of(id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        let job = &mut self.jobs[index];
        job.status = status;
        job.touch(Utc::now());
        let updated = job.clone();

        self.persist();
        Ok(updated)
    }

    /// Removes the record with `id`.
    ///
    /// Idempotent: returns `false` and leaves storage untouched when absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.jobs.remove(index);
        self.persist();
        true
    }

    /// Looks up one record by id.
    pub fn get(&self, id: &str) -> Option<&JobApplication> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Substitutes the whole collection.
    ///
    /// Callers are expected to pass import-validated records.
    pub fn replace_all(&mut self, jobs: Vec<JobApplication>) {
        self.jobs = jobs;
        self.persist();
    }

    /// Validates `text` as an import artifact and replaces the collection.
    ///
    /// Returns the number of imported records.
    pub fn import_json(&mut self, text: &str) -> StoreResult<usize> {
        let jobs = parse_import(text, Utc::now())?;
        Ok(self.apply_import(jobs))
    }

    /// Reads and validates an import file, then replaces the collection.
    pub fn import_file(&mut self, path: &Path) -> StoreResult<usize> {
        let jobs = import_jobs_from_file(path, Utc::now())?;
        Ok(self.apply_import(jobs))
    }

    /// Renders the full collection as an export artifact body.
    pub fn export_json(&self) -> Result<String, ExportError> {
        export_jobs_json(&self.jobs)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// Current list view derived from search term and status filter.
    pub fn filtered(&self) -> Vec<JobApplication> {
        filter_jobs(&self.jobs, &self.search_term, self.status_filter)
    }

    /// Per-status counts over the full collection.
    pub fn stats(&self) -> JobStats {
        job_stats(&self.jobs)
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Sets and persists the theme flag.
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
        self.storage.save_dark_mode(dark_mode);
    }

    /// Flips and persists the theme flag, returning the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.set_dark_mode(!self.dark_mode);
        self.dark_mode
    }

    fn apply_import(&mut self, jobs: Vec<JobApplication>) -> usize {
        let count = jobs.len();
        info!(
            "event=jobs_import module=store status=ok previous_count={} count={}",
            self.jobs.len(),
            count
        );
        self.replace_all(jobs);
        count
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.jobs.iter().position(|job| job.id == id)
    }

    fn persist(&self) {
        self.storage.save_jobs(&self.jobs);
    }
}
