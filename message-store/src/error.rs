//! Storage error types.
//!
//! Used by repository implementations and callers of storage APIs. Uniqueness conflicts are
//! reported as [`StorageError::AlreadyExists`] so the recording path can tell them apart from
//! real failures.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl StorageError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::AlreadyExists(_))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::AlreadyExists(db_err.message().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                StorageError::NotFound(db_err.message().to_string())
            }
            sqlx::Error::RowNotFound => StorageError::NotFound(err.to_string()),
            _ => StorageError::Database(err.to_string()),
        }
    }
}
