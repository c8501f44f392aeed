//! Export artifact production.
//!
//! # Responsibility
//! - Render the full collection as pretty-printed JSON (2-space indent).
//! - Name and write the artifact as `job-applications-<YYYY-MM-DD>.json`.

use crate::model::job::JobApplication;
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Filename prefix shared by every export artifact.
pub const EXPORT_FILE_PREFIX: &str = "job-applications";

#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize job applications: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// Serializes the collection as a pretty-printed JSON array.
pub fn export_jobs_json(jobs: &[JobApplication]) -> Result<String, ExportError> {
    serde_json::to_string_pretty(jobs).map_err(ExportError::Serialize)
}

/// Returns the artifact name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.json", date.format("%Y-%m-%d"))
}

/// Writes the export artifact into `dir` and returns its full path.
///
/// An existing artifact from the same day is overwritten.
///
/// # Errors
/// - Returns `Write` when `dir` does not exist or is not writable.
pub fn write_export(
    dir: &Path,
    jobs: &[JobApplication],
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let body = export_jobs_json(jobs)?;
    let path = dir.join(export_file_name(date));

    if let Err(source) = std::fs::write(&path, body) {
        error!(
            "event=jobs_export module=storage status=error error_code=export_write_failed error={}",
            source
        );
        return Err(ExportError::Write { path, source });
    }

    info!(
        "event=jobs_export module=storage status=ok count={}",
        jobs.len()
    );
    Ok(path)
}
