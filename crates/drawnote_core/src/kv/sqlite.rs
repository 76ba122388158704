//! SQLite-backed key-value storage.
//!
//! # Invariants
//! - Requires a connection opened through `db::open_db*` (migrated).
//! - Each write is one upsert statement, atomic per key.

use super::{KvResult, KvStorage};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value storage over the `kv_store` table.
pub struct SqliteKvStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvStorage for SqliteKvStorage<'_> {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
