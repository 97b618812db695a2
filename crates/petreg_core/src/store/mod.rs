//! Storage port for persisted collections.
//!
//! # Responsibility
//! - Abstract the client-local text store behind `read(key)` / `write(key, text)`.
//! - Keep repositories testable against an in-memory fake.
//!
//! # Invariants
//! - `read` of a never-written key returns `Ok(None)`.
//! - `write` replaces the whole value for the key or fails without effect.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-addressed text store shared by all collections.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;
}

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Db(DbError),
    /// Write would push the store past its byte quota.
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    /// Store refuses access (disabled, closed).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded { key, needed, quota } => write!(
                f,
                "storage quota exceeded writing `{key}`: needs {needed} bytes, quota is {quota}"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}
