//! SQLite connection and schema migrations
use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

const DB_FILE_NAME: &str = "assethub.sqlite3";

/// Ordered schema migrations. The index of each entry + 1 is the
/// `user_version` the database reports once it has been applied.
const MIGRATIONS: &[&str] = &[r"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        first_name TEXT,
        last_name TEXT,
        avatar_url TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
"];

/// Open the async connection to the database stored in `db_path`.
pub async fn async_db(db_path: &str) -> Result<tokio_rusqlite::Connection> {
    let path = Path::new(db_path).join(DB_FILE_NAME);
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(conn)
}

/// Apply every migration newer than the database's `user_version`.
/// Returns the number of migrations applied.
pub fn migrate_db(conn: &mut Connection) -> rusqlite::Result<usize> {
    let current: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    let pending = MIGRATIONS
        .iter()
        .enumerate()
        .skip(current.max(0) as usize);

    let mut applied = 0;
    for (idx, sql) in pending {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", (idx + 1) as i64)?;
        tx.commit()?;
        applied += 1;
    }

    Ok(applied)
}
