//! Store error types.

use thiserror::Error;

/// Store operation errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row or book with the given id
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Uniqueness rule violated before insert
    #[error("{0}")]
    Conflict(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Error raised by SQLite
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: u64) -> Self {
        StoreError::NotFound { entity, id }
    }
}
