//! Application state shared across handlers.

use std::sync::Arc;

use message_log::MessageLogService;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Message log operations.
    pub messages: Arc<MessageLogService>,
    /// Expected `x-api-key` value.
    pub api_key: Arc<str>,
}

impl AppState {
    /// Create new application state.
    pub fn new(messages: MessageLogService, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            messages: Arc::new(messages),
            api_key: api_key.into(),
        }
    }
}
