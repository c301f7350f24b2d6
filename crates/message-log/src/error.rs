//! Error types for message log operations.

use chat_store::StoreError;
use thiserror::Error;

/// Errors returned by message log operations.
///
/// Every variant is terminal for the operation that raised it; nothing is
/// written on any error path.
#[derive(Debug, Error)]
pub enum LogError {
    /// A required parameter was missing or empty.
    #[error("missing required parameter: {0}")]
    InvalidArgument(&'static str),

    /// No log exists for the user.
    #[error("no message log for user {0}")]
    UserNotFound(String),

    /// The message is absent, or exists but was not written by the user.
    #[error("message {message_id} not found for user {user_id}")]
    MessageNotFound { user_id: String, message_id: String },

    /// The storage collaborator failed or timed out.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StoreError> for LogError {
    fn from(err: StoreError) -> Self {
        LogError::StorageUnavailable(err.to_string())
    }
}

/// Result type for message log operations.
pub type Result<T> = std::result::Result<T, LogError>;
