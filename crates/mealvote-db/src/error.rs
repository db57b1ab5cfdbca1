//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Unique constraint violated (duplicate email, etc.)
    #[error("unique constraint violated")]
    Conflict,
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
