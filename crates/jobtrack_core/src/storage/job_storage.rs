//! Records and theme persistence over a key-value repository.
//!
//! # Responsibility
//! - Serialize the full record collection under [`JOBS_STORAGE_KEY`].
//! - Serialize the dark-mode flag under [`THEME_STORAGE_KEY`].
//!
//! # Invariants
//! - Records and theme are independent keys; neither write touches the other.
//! - Absent or unparseable values load as defaults (empty list / `false`).
//! - Errors are logged with metadata only, never record content.

use crate::model::job::JobApplication;
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the JSON array of records.
pub const JOBS_STORAGE_KEY: &str = "job-applications";
/// Storage key holding the JSON boolean dark-mode flag.
pub const THEME_STORAGE_KEY: &str = "job-tracker-theme";

/// Failure while reading or writing one stored value.
#[derive(Debug)]
pub enum StorageError {
    Repo(RepoError),
    Json(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid stored JSON: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<RepoError> for StorageError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Typed view over the two tracker keys.
pub struct JobStorage<R: KeyValueRepository> {
    repo: R,
}

impl<R: KeyValueRepository> JobStorage<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the stored collection.
    ///
    /// Returns an empty list when the key is absent or its value cannot be
    /// decoded.
    pub fn load_jobs(&self) -> Vec<JobApplication> {
        match self.read_json::<Vec<JobApplication>>(JOBS_STORAGE_KEY) {
            Ok(Some(jobs)) => {
                debug!(
                    "event=jobs_load module=storage status=ok count={}",
                    jobs.len()
                );
                jobs
            }
            Ok(None) => {
                debug!("event=jobs_load module=storage status=ok count=0 reason=absent");
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=jobs_load module=storage status=error error_code=jobs_load_failed error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    /// Writes the full collection, replacing the stored value.
    ///
    /// Returns whether the write reached durable storage. Failures are logged
    /// and dropped.
    pub fn save_jobs(&self, jobs: &[JobApplication]) -> bool {
        match self.write_json(JOBS_STORAGE_KEY, jobs) {
            Ok(()) => {
                debug!(
                    "event=jobs_save module=storage status=ok count={}",
                    jobs.len()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=jobs_save module=storage status=error error_code=jobs_save_failed count={} error={}",
                    jobs.len(),
                    err
                );
                false
            }
        }
    }

    /// Loads the dark-mode flag, defaulting to `false`.
    pub fn load_dark_mode(&self) -> bool {
        match self.read_json::<bool>(THEME_STORAGE_KEY) {
            Ok(value) => value.unwrap_or(false),
            Err(err) => {
                warn!(
                    "event=theme_load module=storage status=error error_code=theme_load_failed error={}",
                    err
                );
                false
            }
        }
    }

    /// Writes the dark-mode flag. Failures are logged and dropped.
    pub fn save_dark_mode(&self, dark_mode: bool) -> bool {
        match self.write_json(THEME_STORAGE_KEY, &dark_mode) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=theme_save module=storage status=error error_code=theme_save_failed error={}",
                    err
                );
                false
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.repo.get_value(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.repo.put_value(key, &raw)?;
        Ok(())
    }
}
