//! UI-facing bindings for the job application tracker core.

pub mod api;
