//! Search/status filtering, ordering and per-status counts.
//!
//! # Invariants
//! - Search matching is a case-insensitive substring test over company name,
//!   job title, location and status name.
//! - Results are ordered by `application_date DESC`; equal dates keep
//!   collection order.

use crate::model::job::{JobApplication, JobStatus};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Status filter for list views: everything, or one exact status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    pub fn matches(self, status: JobStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::model::job::UnknownStatus;

    /// Accepts `all` or an exact status name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Self::All);
        }
        value.parse::<JobStatus>().map(Self::Only)
    }
}

/// Per-status record counts over a full collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStats {
    pub total: usize,
    pub applied: usize,
    pub interviewing: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl JobStats {
    /// Returns the count for one status.
    pub fn count(&self, status: JobStatus) -> usize {
        match status {
            JobStatus::Applied => self.applied,
            JobStatus::Interviewing => self.interviewing,
            JobStatus::Offer => self.offer,
            JobStatus::Rejected => self.rejected,
        }
    }
}

/// Applies search term and status filter, then sorts by application date
/// descending.
///
/// An empty search term disables search filtering. The term is matched as
/// given, surrounding whitespace included.
pub fn filter_jobs(
    jobs: &[JobApplication],
    search_term: &str,
    status_filter: StatusFilter,
) -> Vec<JobApplication> {
    let needle = search_term.to_lowercase();

    let mut filtered = jobs
        .iter()
        .filter(|job| needle.is_empty() || matches_search(job, &needle))
        .filter(|job| status_filter.matches(job.status))
        .cloned()
        .collect::<Vec<_>>();

    // Stable sort: equal dates keep collection order.
    filtered.sort_by(|a, b| b.application_date.cmp(&a.application_date));
    filtered
}

/// Counts records per status.
pub fn job_stats(jobs: &[JobApplication]) -> JobStats {
    jobs.iter().fold(
        JobStats {
            total: jobs.len(),
            ..JobStats::default()
        },
        |mut stats, job| {
            match job.status {
                JobStatus::Applied => stats.applied += 1,
                JobStatus::Interviewing => stats.interviewing += 1,
                JobStatus::Offer => stats.offer += 1,
                JobStatus::Rejected => stats.rejected += 1,
            }
            stats
        },
    )
}

fn matches_search(job: &JobApplication, needle: &str) -> bool {
    job.company_name.to_lowercase().contains(needle)
        || job.job_title.to_lowercase().contains(needle)
        || job
            .location
            .as_deref()
            .is_some_and(|location| location.to_lowercase().contains(needle))
        || job.status.as_str().to_lowercase().contains(needle)
}
