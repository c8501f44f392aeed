//! Domain model for job application tracking.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep field validation next to the data it guards.
//!
//! # Invariants
//! - Every record is identified by a stable `JobId`.
//! - Timestamps are system-managed; callers only supply a `JobDraft`.

pub mod job;
