//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the string-keyed durable storage contract.
//! - Isolate SQLite query details from the persistence adapter.
//!
//! # See also
//! - `storage` for the typed records/theme adapter built on top.

pub mod kv_repo;
