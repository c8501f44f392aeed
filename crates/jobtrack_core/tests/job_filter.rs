use chrono::{NaiveDate, Utc};
use jobtrack_core::{filter_jobs, job_stats, JobApplication, JobDraft, JobStatus, StatusFilter};

fn job(id: &str, company: &str, status: JobStatus, applied_on: (i32, u32, u32)) -> JobApplication {
    let (y, m, d) = applied_on;
    let mut draft = JobDraft::new(company, "Engineer", NaiveDate::from_ymd_opt(y, m, d).unwrap());
    draft.status = status;
    JobApplication::with_id(id, draft, Utc::now())
}

fn ids(jobs: &[JobApplication]) -> Vec<&str> {
    jobs.iter().map(|job| job.id.as_str()).collect()
}

#[test]
fn status_filter_keeps_exact_matches_sorted_by_date_desc() {
    let jobs = vec![
        job("1", "Foo", JobStatus::Applied, (2024, 1, 1)),
        job("2", "Bar", JobStatus::Offer, (2024, 3, 1)),
        job("3", "Baz", JobStatus::Applied, (2024, 2, 1)),
    ];

    let filtered = filter_jobs(&jobs, "", StatusFilter::Only(JobStatus::Applied));
    assert_eq!(ids(&filtered), vec!["3", "1"]);
}

#[test]
fn search_is_case_insensitive_substring_match() {
    let jobs = vec![job("1", "Acme Corp", JobStatus::Applied, (2024, 1, 1))];

    for term in ["acme", "ACME", "mE c"] {
        assert_eq!(filter_jobs(&jobs, term, StatusFilter::All).len(), 1, "{term}");
    }
    assert!(filter_jobs(&jobs, "zzz", StatusFilter::All).is_empty());
}

#[test]
fn search_term_is_not_trimmed() {
    let jobs = vec![job("1", "Acme Corp", JobStatus::Applied, (2024, 1, 1))];

    assert!(filter_jobs(&jobs, "corp ", StatusFilter::All).is_empty());
    assert_eq!(filter_jobs(&jobs, " ", StatusFilter::All).len(), 1);
}

#[test]
fn search_covers_title_location_and_status_name() {
    let mut with_location = job("1", "Foo", JobStatus::Interviewing, (2024, 1, 1));
    with_location.location = Some("Lisbon".to_string());
    with_location.job_title = "Platform Engineer".to_string();
    let without_location = job("2", "Bar", JobStatus::Applied, (2024, 1, 2));
    let jobs = vec![with_location, without_location];

    assert_eq!(ids(&filter_jobs(&jobs, "lisbon", StatusFilter::All)), vec!["1"]);
    assert_eq!(ids(&filter_jobs(&jobs, "platform", StatusFilter::All)), vec!["1"]);
    assert_eq!(ids(&filter_jobs(&jobs, "interview", StatusFilter::All)), vec!["1"]);
    assert_eq!(ids(&filter_jobs(&jobs, "applied", StatusFilter::All)), vec!["2"]);
}

#[test]
fn search_and_status_filter_combine() {
    let jobs = vec![
        job("1", "Acme", JobStatus::Offer, (2024, 1, 1)),
        job("2", "Acme Labs", JobStatus::Applied, (2024, 1, 5)),
        job("3", "Globex", JobStatus::Offer, (2024, 1, 9)),
    ];

    let filtered = filter_jobs(&jobs, "acme", StatusFilter::Only(JobStatus::Offer));
    assert_eq!(ids(&filtered), vec!["1"]);
}

#[test]
fn equal_dates_keep_collection_order() {
    let jobs = vec![
        job("first", "A", JobStatus::Applied, (2024, 1, 1)),
        job("second", "B", JobStatus::Applied, (2024, 1, 1)),
        job("newest", "C", JobStatus::Applied, (2024, 6, 1)),
    ];

    let filtered = filter_jobs(&jobs, "", StatusFilter::All);
    assert_eq!(ids(&filtered), vec!["newest", "first", "second"]);
}

#[test]
fn stats_sum_to_total() {
    let jobs = vec![
        job("1", "A", JobStatus::Applied, (2024, 1, 1)),
        job("2", "B", JobStatus::Interviewing, (2024, 1, 1)),
        job("3", "C", JobStatus::Interviewing, (2024, 1, 1)),
        job("4", "D", JobStatus::Rejected, (2024, 1, 1)),
    ];

    let stats = job_stats(&jobs);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.count(JobStatus::Interviewing), 2);
    assert_eq!(stats.count(JobStatus::Offer), 0);
    let summed: usize = JobStatus::ALL.iter().map(|status| stats.count(*status)).sum();
    assert_eq!(summed, stats.total);
}
