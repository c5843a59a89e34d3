//! SQLite database handle and per-request sessions.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::StoreError;

/// Offset/limit window over an id-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows skipped before the window starts
    pub skip: u32,
    /// Maximum rows returned
    pub limit: u32,
}

/// Converts an external id into a SQLite rowid.
///
/// Rowids are signed, so ids above `i64::MAX` can never name a stored row.
pub(crate) fn rowid(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

/// Handle on the SQLite file backing users, items and products.
///
/// The handle itself holds no connection. Every request opens its own
/// [`session`](Database::session) and drops it when the request ends.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the schema if it does not exist yet.
    pub fn init(&self) -> Result<(), StoreError> {
        let conn = self.session()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                hashed_password TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                owner_id INTEGER NOT NULL REFERENCES users(id)
            );
            CREATE INDEX IF NOT EXISTS idx_items_owner ON items(owner_id);
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL
            );",
        )?;
        tracing::debug!("Schema ready at {}", self.path.display());
        Ok(())
    }

    /// Opens a connection scoped to a single request.
    pub fn session(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }
}
