//! Derived read-only views over the record collection.
//!
//! # Responsibility
//! - Filter and order records for list display.
//! - Summarize records per status.
//!
//! # Invariants
//! - Views hold no state and are recomputed on every read.

pub mod filter;
