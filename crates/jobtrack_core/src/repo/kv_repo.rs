//! String-keyed durable storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide whole-value get/put over one `kv_entries` table.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Keys are opaque; values are stored verbatim.
//! - `put_value` replaces any previous value for the key.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for key-value persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string-keyed store.
pub trait KeyValueRepository {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>>;
    fn put_value(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<R: KeyValueRepository + ?Sized> KeyValueRepository for &R {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_value(key)
    }

    fn put_value(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).put_value(key, value)
    }
}

/// SQLite-backed key-value repository.
pub struct SqliteKeyValueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueRepository for SqliteKeyValueRepository<'_> {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_value(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueRepository, SqliteKeyValueRepository};
    use crate::db::open_db_in_memory;

    #[test]
    fn put_overwrites_previous_value() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteKeyValueRepository::new(&conn);

        repo.put_value("k", "one").unwrap();
        repo.put_value("k", "two").unwrap();

        assert_eq!(repo.get_value("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteKeyValueRepository::new(&conn);

        assert!(repo.get_value("absent").unwrap().is_none());
    }
}
