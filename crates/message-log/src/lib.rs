//! Per-user message logs for the chat API.
//!
//! This crate provides [`MessageLogService`], which applies the three user
//! operations to a [`DocumentStore`](chat_store::DocumentStore), asking a
//! [`Responder`](intent_brain::Responder) for bot replies.
//!
//! # Operations
//!
//! | Operation | Writes | Errors |
//! |-----------|--------|--------|
//! | `send` | user entry + bot entry (merge) | `InvalidArgument` |
//! | `edit` | edited entry + new bot entry (overwrite) | `InvalidArgument`, `UserNotFound`, `MessageNotFound` |
//! | `delete` | removes one user entry | `InvalidArgument`, `UserNotFound`, `MessageNotFound` |
//! | `history` | nothing | `InvalidArgument`, `UserNotFound` |
//!
//! Any operation may also fail with `StorageUnavailable`.
//!
//! # Identity
//!
//! Message ids are millisecond timestamps rendered as decimal strings. A bot
//! reply's id is always its trigger's id plus [`BOT_REPLY_OFFSET_MS`], so
//! replies sort after the message that caused them.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use chat_store::MemoryStore;
//! use intent_brain::IntentResponder;
//! use message_log::MessageLogService;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), message_log::LogError> {
//!     let service = MessageLogService::new(
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(IntentResponder::builtin()),
//!     );
//!
//!     let sent = service.send("user-1", "hello").await?;
//!     service.delete("user-1", &sent.user_message_id).await?;
//!     Ok(())
//! }
//! ```

mod error;
mod ids;
mod locks;
mod service;

pub use error::{LogError, Result};
pub use ids::{IdClock, BOT_REPLY_OFFSET_MS};
pub use locks::{UserGuard, UserLocks};
pub use service::{EditOutcome, MessageLogConfig, MessageLogService, SendOutcome, DEFAULT_STORE_TIMEOUT};
