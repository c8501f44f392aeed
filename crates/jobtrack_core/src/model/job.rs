//! Job application domain model.
//!
//! # Responsibility
//! - Define the canonical job application record and its status lifecycle.
//! - Validate caller-supplied drafts before they reach the store.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `created_at` is set once; `updated_at >= created_at` at all times.
//! - `status` is always one of the four [`JobStatus`] values.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Opaque record identifier.
///
/// Generated records carry UUID v4 text, but imported collections may use any
/// non-empty string, so the identifier is not parsed.
pub type JobId = String;

/// Stage of a job application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Submitted, no response yet.
    #[default]
    Applied,
    /// Interview process under way.
    Interviewing,
    /// Offer received.
    Offer,
    /// Closed without an offer.
    Rejected,
}

impl JobStatus {
    /// All statuses in pipeline order.
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interviewing,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    /// Returns the canonical serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interviewing => "Interviewing",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status name is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl Display for UnknownStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown status `{}`; expected Applied|Interviewing|Offer|Rejected",
            self.0
        )
    }
}

impl Error for UnknownStatus {}

impl FromStr for JobStatus {
    type Err = UnknownStatus;

    /// Parses the exact serialized name. Matching is case-sensitive.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Applied" => Ok(Self::Applied),
            "Interviewing" => Ok(Self::Interviewing),
            "Offer" => Ok(Self::Offer),
            "Rejected" => Ok(Self::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Canonical job application record.
///
/// Serialized with camelCase keys; optional text fields are omitted when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: JobId,
    pub company_name: String,
    pub job_title: String,
    pub status: JobStatus,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub application_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    /// Builds a new record from a draft with a generated id.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now`.
    /// - The draft is not validated here; see [`JobDraft::validate`].
    pub fn from_draft(draft: JobDraft, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), draft, now)
    }

    /// Builds a record with a caller-provided id.
    ///
    /// Used by edit flows where identity already exists.
    pub fn with_id(id: impl Into<JobId>, draft: JobDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            company_name: draft.company_name,
            job_title: draft.job_title,
            status: draft.status,
            application_date: draft.application_date,
            notes: draft.notes,
            salary: draft.salary,
            location: draft.location,
            job_url: draft.job_url,
            contact_email: draft.contact_email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the editable fields of this record.
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            company_name: self.company_name.clone(),
            job_title: self.job_title.clone(),
            status: self.status,
            application_date: self.application_date,
            notes: self.notes.clone(),
            salary: self.salary.clone(),
            location: self.location.clone(),
            job_url: self.job_url.clone(),
            contact_email: self.contact_email.clone(),
        }
    }

    /// Refreshes `updated_at` without letting it move backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at.max(self.created_at);
        self.updated_at = now.max(floor);
    }
}

/// Caller-supplied fields of a job application.
///
/// Everything except the system-managed `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub company_name: String,
    pub job_title: String,
    pub status: JobStatus,
    pub application_date: NaiveDate,
    pub notes: String,
    pub salary: Option<String>,
    pub location: Option<String>,
    pub job_url: Option<String>,
    pub contact_email: Option<String>,
}

impl JobDraft {
    /// Creates a draft with required fields set and everything else empty.
    pub fn new(
        company_name: impl Into<String>,
        job_title: impl Into<String>,
        application_date: NaiveDate,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            job_title: job_title.into(),
            status: JobStatus::default(),
            application_date,
            notes: String::new(),
            salary: None,
            location: None,
            job_url: None,
            contact_email: None,
        }
    }

    /// Checks the draft the way the entry form does.
    ///
    /// Collects every violation instead of stopping at the first one so each
    /// can be shown next to its input.
    pub fn validate(&self) -> Result<(), JobValidationError> {
        let mut violations = Vec::new();

        if self.company_name.trim().is_empty() {
            violations.push(FieldViolation::new(
                JobField::CompanyName,
                "Company name is required",
            ));
        }
        if self.job_title.trim().is_empty() {
            violations.push(FieldViolation::new(
                JobField::JobTitle,
                "Job title is required",
            ));
        }
        if let Some(email) = self.contact_email.as_deref() {
            if !email.is_empty() && !EMAIL_RE.is_match(email) {
                violations.push(FieldViolation::new(
                    JobField::ContactEmail,
                    "Please enter a valid email address",
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(JobValidationError { violations })
        }
    }
}

/// Parses a form-style `YYYY-MM-DD` application date.
///
/// # Errors
/// - Returns a single `applicationDate` violation when blank or malformed.
pub fn parse_application_date(value: &str) -> Result<NaiveDate, JobValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(JobValidationError::single(
            JobField::ApplicationDate,
            "Application date is required",
        ));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        JobValidationError::single(
            JobField::ApplicationDate,
            "Application date must be formatted as YYYY-MM-DD",
        )
    })
}

/// Form fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    CompanyName,
    JobTitle,
    ApplicationDate,
    ContactEmail,
}

impl JobField {
    /// Returns the serialized field name used by the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::JobTitle => "jobTitle",
            Self::ApplicationDate => "applicationDate",
            Self::ContactEmail => "contactEmail",
        }
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: JobField,
    pub message: &'static str,
}

impl FieldViolation {
    fn new(field: JobField, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Draft validation failure carrying every violated field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobValidationError {
    pub violations: Vec<FieldViolation>,
}

impl JobValidationError {
    fn single(field: JobField, message: &'static str) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    /// Returns the message for one field, if that field failed.
    pub fn message_for(&self, field: JobField) -> Option<&'static str> {
        self.violations
            .iter()
            .find(|violation| violation.field == field)
            .map(|violation| violation.message)
    }
}

impl Display for JobValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .violations
            .iter()
            .map(|violation| format!("{}: {}", violation.field.as_str(), violation.message))
            .collect::<Vec<_>>();
        write!(f, "invalid job application: {}", parts.join("; "))
    }
}

impl Error for JobValidationError {}
