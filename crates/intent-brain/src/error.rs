//! Error types for building intent tables.

use thiserror::Error;

/// Errors raised while validating an intent table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    /// A rule was declared without any keywords.
    #[error("rule {index} has no keywords")]
    NoKeywords { index: usize },

    /// A rule contains an empty keyword, which would match every text.
    #[error("rule {index} contains an empty keyword")]
    EmptyKeyword { index: usize },

    /// The table has no fallback replies to choose from.
    #[error("fallback reply list is empty")]
    NoFallbacks,
}
