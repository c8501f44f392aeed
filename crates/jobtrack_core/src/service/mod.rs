//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory tracker state and its mutation API.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod job_store;
