//! Key-value storage boundary.
//!
//! # Responsibility
//! - Define the get/set-by-key contract the note store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Values are opaque strings; callers own their encoding.
//! - A single `set_item` either replaces the whole value or fails; there is
//!   no partially written value.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKvStorage;
pub use sqlite::SqliteKvStorage;

pub type KvResult<T> = Result<T, KvError>;

/// Failure of the underlying storage medium.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Medium unavailable, full, or otherwise refusing the operation.
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String values addressed by string keys.
pub trait KvStorage {
    /// Returns the stored value, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()>;
}

impl<S: KvStorage + ?Sized> KvStorage for &mut S {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }
}
