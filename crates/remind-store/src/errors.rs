//! Error types for the persistence layer.

use thiserror::Error;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// JSON serialization of the devices column failed.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// Uniqueness constraint violated — e.g. two concurrent creation
    /// batches racing on the same (task_id, time) pair.
    #[error("conflict: {message}")]
    Conflict {
        /// The violated constraint, as reported by the backend.
        message: String,
    },

    /// A stored row failed domain reconstruction.
    #[error("corrupt row: {message}")]
    Corrupt {
        /// What failed to reconstruct.
        message: String,
    },
}

impl StoreError {
    /// Translate a `rusqlite` error, surfacing constraint violations as
    /// [`StoreError::Conflict`].
    pub fn from_sqlite(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, ref message) = err {
            if failure.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::Conflict {
                    message: message
                        .clone()
                        .unwrap_or_else(|| "constraint violation".to_string()),
                };
            }
        }
        Self::Sqlite(err)
    }

    /// Whether this error is a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Convenience alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
