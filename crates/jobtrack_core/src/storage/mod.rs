//! Persistence adapter between typed tracker state and durable storage.
//!
//! # Responsibility
//! - Load/save the record collection and the theme flag under fixed keys.
//! - Produce export artifacts and validate import artifacts.
//!
//! # Invariants
//! - Load and save never raise: failures are logged and degrade to defaults.
//! - Import is all-or-nothing: any invalid element rejects the whole file.

pub mod export;
pub mod import;
pub mod job_storage;
