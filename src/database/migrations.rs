//! Schema migrations for the PantryChef SQLite database.
//!
//! Applied versions are recorded in `schema_version`; each step in
//! [`MIGRATIONS`] runs once, inside its own transaction.

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use rusqlite::{params, Connection};

/// One schema step: version, description, SQL.
type Migration = (i32, &'static str, &'static str);

const MIGRATIONS: &[Migration] = &[(
    1,
    "Local storage key-value table",
    "CREATE TABLE IF NOT EXISTS local_storage (
         key TEXT PRIMARY KEY,
         value TEXT NOT NULL,
         updated_at INTEGER NOT NULL
     );",
)];

/// Schema version after all migrations ran. Bump together with [`MIGRATIONS`].
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Highest applied version, 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

/// Applies pending migrations. Safe to call on every open.
///
/// # Errors
/// Returns `rusqlite::Error` if any step fails; that step is rolled back.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY,
             applied_at INTEGER NOT NULL,
             description TEXT NOT NULL
         );",
    )?;

    let current = get_schema_version(conn);
    for (version, description, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        conn.execute_batch("BEGIN")?;
        let applied = conn.execute_batch(sql).and_then(|_| {
            conn.execute(
                "INSERT INTO schema_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
                params![version, now, description],
            )
        });
        match applied {
            Ok(_) => conn.execute_batch("COMMIT")?,
            Err(e) => {
                conn.execute_batch("ROLLBACK")?;
                return Err(e);
            }
        }
        info!("schema migrated to v{}: {}", version, description);
    }

    Ok(())
}
