//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row carries an author value this crate does not know.
    #[error("unknown author '{0}'")]
    UnknownAuthor(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
