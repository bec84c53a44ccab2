//! Database schema creation

use rusqlite::Connection;

use crate::connection::DbError;

/// Current database schema version
pub const DB_VERSION: i32 = 1;

/// Initialize the database schema (idempotent)
pub fn init_schema(conn: &mut Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS metadata (
            key TEXT PRIMARY KEY,
            value TEXT
        )",
    )?;

    // One row per imported transcript document
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sources (
            source TEXT PRIMARY KEY,
            line_count INTEGER NOT NULL,
            invalid_count INTEGER NOT NULL,
            imported_at TEXT NOT NULL
        )",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS lines (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source TEXT NOT NULL,
            position INTEGER NOT NULL,
            text TEXT NOT NULL,
            timestamp INTEGER NOT NULL,
            UNIQUE(source, position)
        )",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_lines_source ON lines(source);
         CREATE INDEX IF NOT EXISTS idx_lines_timestamp ON lines(timestamp);",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('version', ?1)",
        [DB_VERSION.to_string()],
    )?;

    Ok(())
}
