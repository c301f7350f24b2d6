//! Per-user message log persistence for the chat API.
//!
//! Storage is modelled as one document per user: a mapping from message id
//! to [`MessageEntry`]. The [`DocumentStore`] trait is the only capability the
//! message log needs, and this crate ships two implementations:
//!
//! - [`MemoryStore`] - process-local, for tests and single-node development
//! - [`SqliteStore`] - SQLx with SQLite, one row per entry
//!
//! # Example
//!
//! ```no_run
//! use chat_store::{DocumentStore, MessageEntry, SqliteStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::connect("sqlite:chat.db?mode=rwc").await?;
//!     store.migrate().await?;
//!
//!     store
//!         .merge_set("user-1", &[MessageEntry::user("1741269454219", "Hello!")])
//!         .await?;
//!
//!     let log = store.get("user-1").await?;
//!     assert!(log.is_some());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use models::{Author, MessageEntry, MessageLog};
pub use sqlite::SqliteStore;

use async_trait::async_trait;

/// An abstract per-user document store.
///
/// Each user id names one document holding that user's entries. A document
/// comes into existence on the first write and is never removed, even when
/// all of its entries have been deleted.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load a user's log, or `None` if no document exists.
    async fn get(&self, user_id: &str) -> Result<Option<MessageLog>>;

    /// Upsert the given entries, leaving all other entries untouched.
    ///
    /// Creates the document if it does not exist.
    async fn merge_set(&self, user_id: &str, entries: &[MessageEntry]) -> Result<()>;

    /// Replace the whole document with `log`.
    async fn overwrite(&self, log: &MessageLog) -> Result<()>;

    /// Remove a single entry. Removing an absent entry is not an error.
    async fn delete_field(&self, user_id: &str, message_id: &str) -> Result<()>;
}
