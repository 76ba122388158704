//! Layout versions of the note database.
//!
//! Step `n` of `SCHEMA_STEPS` turns a version `n` file into version `n + 1`.
//! Steps are append-only; an existing step is never edited.

use super::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_STEPS: &[&str] = &[include_str!("sql/0001_kv_store.sql")];

/// Layout version written by this build.
pub const SCHEMA_VERSION: u32 = SCHEMA_STEPS.len() as u32;

/// Versions before and after `upgrade` ran on one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    pub from: u32,
    pub to: u32,
}

impl SchemaUpgrade {
    pub fn applied_steps(&self) -> u32 {
        self.to - self.from
    }
}

/// Brings `conn` up to `SCHEMA_VERSION` inside one transaction.
pub fn upgrade(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    let from = stored_version(conn)?;
    if from > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found: from,
            supported: SCHEMA_VERSION,
        });
    }

    if from < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        for (version, sql) in (1u32..).zip(SCHEMA_STEPS).skip(from as usize) {
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
        }
        tx.commit()?;
    }

    Ok(SchemaUpgrade {
        from,
        to: SCHEMA_VERSION,
    })
}

/// Layout version recorded in the file; `0` for a fresh file.
pub fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::{stored_version, upgrade, SCHEMA_VERSION};
    use rusqlite::Connection;

    #[test]
    fn fresh_file_runs_every_step_once() {
        let mut conn = Connection::open_in_memory().unwrap();

        let first = upgrade(&mut conn).unwrap();
        assert_eq!(first.from, 0);
        assert_eq!(first.applied_steps(), SCHEMA_VERSION);

        let second = upgrade(&mut conn).unwrap();
        assert_eq!(second.applied_steps(), 0);
        assert_eq!(stored_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
