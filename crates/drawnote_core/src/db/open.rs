//! Connection setup for the note database.
//!
//! # Invariants
//! - Returned connections wait up to `BUSY_TIMEOUT` on a locked file.
//! - Returned connections are at `SCHEMA_VERSION`.

use super::schema::{upgrade, SchemaUpgrade};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating when missing) a database file ready for key-value use.
///
/// Emits one `db_open` event with the layout versions and duration.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory database ready for key-value use.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let opened = connect()
        .map_err(DbError::from)
        .and_then(|mut conn| prepare(&mut conn).map(|upgrade| (conn, upgrade)));

    match opened {
        Ok((conn, SchemaUpgrade { from, to })) => {
            info!(
                "event=db_open module=db status=ok mode={mode} schema_from={from} schema_to={to} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn prepare(conn: &mut Connection) -> DbResult<SchemaUpgrade> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    upgrade(conn)
}
