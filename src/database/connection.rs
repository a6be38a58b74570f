//! SQLite connection for PantryChef local storage.

use std::path::Path;
use std::time::Duration;

use log::debug;
use rusqlite::Connection;

use super::migrations;

/// How long a write waits for another process holding the database lock.
/// The RPC host and the window may share one file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Owns the SQLite connection backing local storage. Migrations run on open.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path`.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        debug!("opening database {}", path.as_ref().display());
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::init(conn)
    }

    /// Opens a private in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
