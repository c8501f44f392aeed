//! Import artifact validation.
//!
//! # Responsibility
//! - Parse uploaded text into a validated record collection.
//! - Report the first offending element with a user-facing message.
//!
//! # Invariants
//! - The top-level value must be a JSON array.
//! - Every element carries non-empty string `id`, `companyName`, `jobTitle`,
//!   `status` and `applicationDate`.
//! - `status` must be a known value and ids must be unique.
//! - Returned records satisfy `updated_at >= created_at`.

use crate::model::job::{JobApplication, JobStatus};
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const REQUIRED_FIELDS: [&str; 5] = ["id", "companyName", "jobTitle", "status", "applicationDate"];

#[derive(Debug)]
pub enum ImportError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    NotAnArray,
    MissingField {
        index: usize,
        field: &'static str,
    },
    InvalidRecord {
        index: usize,
        message: String,
    },
    DuplicateId(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse JSON file: {err}"),
            Self::NotAnArray => write!(f, "invalid job data format: expected a JSON array"),
            Self::MissingField { index, field } => write!(
                f,
                "invalid job data format: record {index} is missing `{field}`"
            ),
            Self::InvalidRecord { index, message } => {
                write!(f, "invalid job data format: record {index}: {message}")
            }
            Self::DuplicateId(id) => write!(f, "invalid job data format: duplicate id `{id}`"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Lenient wire shape of one imported element.
///
/// System timestamps are optional here because hand-edited files often drop
/// them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedJob {
    id: String,
    company_name: String,
    job_title: String,
    status: JobStatus,
    application_date: NaiveDate,
    notes: Option<String>,
    salary: Option<String>,
    location: Option<String>,
    job_url: Option<String>,
    contact_email: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl ImportedJob {
    fn into_job(self, now: DateTime<Utc>) -> JobApplication {
        let created_at = self.created_at.unwrap_or(now);
        let updated_at = self.updated_at.unwrap_or(created_at).max(created_at);
        JobApplication {
            id: self.id,
            company_name: self.company_name,
            job_title: self.job_title,
            status: self.status,
            application_date: self.application_date,
            notes: self.notes.unwrap_or_default(),
            salary: self.salary,
            location: self.location,
            job_url: self.job_url,
            contact_email: self.contact_email,
            created_at,
            updated_at,
        }
    }
}

/// Parses and validates an import artifact.
///
/// `now` fills in missing `createdAt`/`updatedAt` values.
///
/// # Errors
/// - Fails on the first problem found; no partial collection is returned.
pub fn parse_import(text: &str, now: DateTime<Utc>) -> Result<Vec<JobApplication>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    let Value::Array(elements) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut seen_ids = HashSet::with_capacity(elements.len());
    let mut jobs = Vec::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        check_required_fields(index, &element)?;

        let imported: ImportedJob =
            serde_json::from_value(element).map_err(|err| ImportError::InvalidRecord {
                index,
                message: err.to_string(),
            })?;

        if !seen_ids.insert(imported.id.clone()) {
            return Err(ImportError::DuplicateId(imported.id));
        }
        jobs.push(imported.into_job(now));
    }

    Ok(jobs)
}

/// Reads an import artifact from disk.
pub fn read_import_file(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and validates an import artifact in one step.
///
/// # Side effects
/// - Emits one `jobs_import` logging event with the outcome.
pub fn import_jobs_from_file(
    path: &Path,
    now: DateTime<Utc>,
) -> Result<Vec<JobApplication>, ImportError> {
    let result = read_import_file(path).and_then(|text| parse_import(&text, now));
    match &result {
        Ok(jobs) => info!(
            "event=jobs_import module=storage status=ok count={}",
            jobs.len()
        ),
        Err(err) => warn!(
            "event=jobs_import module=storage status=error error_code=import_rejected error={}",
            err
        ),
    }
    result
}

fn check_required_fields(index: usize, element: &Value) -> Result<(), ImportError> {
    let Value::Object(fields) = element else {
        return Err(ImportError::InvalidRecord {
            index,
            message: "expected a JSON object".to_string(),
        });
    };

    for field in REQUIRED_FIELDS {
        let present = fields
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|value| !value.is_empty());
        if !present {
            return Err(ImportError::MissingField { index, field });
        }
    }
    Ok(())
}
