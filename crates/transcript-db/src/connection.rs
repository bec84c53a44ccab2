//! Database connection management

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database not found at {0}")]
    NotFound(PathBuf),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database not initialized (run: transcript import)")]
    NotInitialized,

    #[error("Database version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Default database path
pub fn default_db_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
    PathBuf::from(home)
        .join(".naplay-transcripts")
        .join("transcripts.db")
}

/// Store for parsed transcript lines
pub struct TranscriptStore {
    pub(crate) conn: Connection,
    path: Option<PathBuf>,
}

impl TranscriptStore {
    /// Open or create the database at the default path
    pub fn open_or_create_default() -> Result<Self, DbError> {
        Self::open_or_create(&default_db_path())
    }

    /// Open or create the database at a specific path
    pub fn open_or_create(path: &Path) -> Result<Self, DbError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        let mut store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        schema::init_schema(&mut store.conn)?;

        Ok(store)
    }

    /// Open an existing database read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(DbError::NotFound(path));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let store = Self {
            conn,
            path: Some(path),
        };
        store.check_version()?;

        Ok(store)
    }

    /// Fresh in-memory database with the schema applied
    pub fn open_in_memory() -> Result<Self, DbError> {
        let mut store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        schema::init_schema(&mut store.conn)?;
        Ok(store)
    }

    fn check_version(&self) -> Result<(), DbError> {
        let version: Option<i32> = self
            .conn
            .query_row(
                "SELECT CAST(value AS INTEGER) FROM metadata WHERE key = 'version'",
                [],
                |row| row.get(0),
            )
            .ok();

        match version {
            None => Err(DbError::NotInitialized),
            Some(v) if v < schema::DB_VERSION => Err(DbError::VersionMismatch {
                expected: schema::DB_VERSION,
                found: v,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Database file path; `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the underlying connection (for custom queries)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats, DbError> {
        let line_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM lines", [], |row| row.get(0))?;

        let source_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sources", [], |row| row.get(0))?;

        let invalid_count: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(invalid_count), 0) FROM sources",
            [],
            |row| row.get(0),
        )?;

        let last_imported: Option<String> = self
            .conn
            .query_row("SELECT MAX(imported_at) FROM sources", [], |row| row.get(0))?;

        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(DbStats {
            version: schema::DB_VERSION,
            line_count,
            source_count,
            invalid_count,
            last_imported,
            db_path: self.path.clone(),
            db_size_bytes: db_size,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub version: i32,
    pub line_count: i64,
    pub source_count: i64,
    pub invalid_count: i64,
    pub last_imported: Option<String>,
    pub db_path: Option<PathBuf>,
    pub db_size_bytes: u64,
}

impl DbStats {
    /// Format database size as human-readable string
    pub fn format_size(&self) -> String {
        let bytes = self.db_size_bytes as f64;
        if bytes < 1024.0 {
            format!("{} B", bytes)
        } else if bytes < 1024.0 * 1024.0 {
            format!("{:.1} KB", bytes / 1024.0)
        } else if bytes < 1024.0 * 1024.0 * 1024.0 {
            format!("{:.1} MB", bytes / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", bytes / (1024.0 * 1024.0 * 1024.0))
        }
    }
}
