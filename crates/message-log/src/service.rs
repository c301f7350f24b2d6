//! Send, edit and delete over per-user message logs.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chat_store::{DocumentStore, MessageEntry, MessageLog};
use intent_brain::Responder;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{LogError, Result};
use crate::ids::{IdClock, BOT_REPLY_OFFSET_MS};
use crate::locks::UserLocks;

/// Default bound on a single storage call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Tunables for [`MessageLogService`].
#[derive(Debug, Clone)]
pub struct MessageLogConfig {
    /// Bound on each storage call before failing with `StorageUnavailable`.
    pub store_timeout: Duration,
}

impl Default for MessageLogConfig {
    fn default() -> Self {
        Self {
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Result of a successful `send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub reply_text: String,
    pub bot_reply_id: String,
    pub user_message_id: String,
}

/// Result of a successful `edit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub reply_text: String,
    pub bot_reply_id: String,
}

/// Applies user operations to message logs.
///
/// Every operation runs under the user's lock, so at most one
/// read-modify-write cycle per user id is in flight. Operations on different
/// users proceed independently.
pub struct MessageLogService {
    store: Arc<dyn DocumentStore>,
    responder: Arc<dyn Responder>,
    clock: IdClock,
    locks: UserLocks,
    config: MessageLogConfig,
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        warn!(field, "Missing required parameter");
        return Err(LogError::InvalidArgument(field));
    }
    Ok(())
}

fn message_not_found(user_id: &str, message_id: &str) -> LogError {
    LogError::MessageNotFound {
        user_id: user_id.to_string(),
        message_id: message_id.to_string(),
    }
}

impl MessageLogService {
    /// Create a service over a store and a responder with default settings.
    pub fn new(store: Arc<dyn DocumentStore>, responder: Arc<dyn Responder>) -> Self {
        Self::with_config(store, responder, MessageLogConfig::default())
    }

    /// Create a service with explicit settings.
    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        responder: Arc<dyn Responder>,
        config: MessageLogConfig,
    ) -> Self {
        Self {
            store,
            responder,
            clock: IdClock::system(),
            locks: UserLocks::new(),
            config,
        }
    }

    /// Replace the id clock.
    pub fn with_clock(mut self, clock: IdClock) -> Self {
        self.clock = clock;
        self
    }

    /// Store a user message and its bot reply.
    pub async fn send(&self, user_id: &str, text: &str) -> Result<SendOutcome> {
        require("userId", user_id)?;
        require("text", text)?;

        let _guard = self.locks.acquire(user_id).await;
        let existing = self.bounded("get", self.store.get(user_id)).await?;

        let (user_message_id, bot_reply_id) = self.allocate_pair(existing.as_ref());
        let reply_text = self.responder.respond(text);
        debug!(user_id, text, reply = %reply_text, "Generated reply");

        let entries = [
            MessageEntry::user(&user_message_id, text),
            MessageEntry::bot(&bot_reply_id, &reply_text),
        ];
        self.bounded("merge_set", self.store.merge_set(user_id, &entries))
            .await?;

        info!(user_id, %user_message_id, %bot_reply_id, "Saved user message and reply");

        Ok(SendOutcome {
            reply_text,
            bot_reply_id,
            user_message_id,
        })
    }

    /// Replace the text of a user message and append a fresh bot reply.
    ///
    /// The reply produced for the old text stays in the log.
    pub async fn edit(&self, user_id: &str, message_id: &str, new_text: &str) -> Result<EditOutcome> {
        require("userId", user_id)?;
        require("messageId", message_id)?;
        require("newText", new_text)?;

        let _guard = self.locks.acquire(user_id).await;
        let mut log = self.load_existing(user_id).await?;
        self.ensure_user_authored(&log, message_id)?;

        log.upsert(MessageEntry::user(message_id, new_text));

        let reply_text = self.responder.respond(new_text);
        let bot_reply_id = self.allocate_bot_id(&log);
        log.upsert(MessageEntry::bot(&bot_reply_id, &reply_text));

        self.bounded("overwrite", self.store.overwrite(&log)).await?;

        info!(user_id, message_id, %bot_reply_id, "Edited user message");

        Ok(EditOutcome {
            reply_text,
            bot_reply_id,
        })
    }

    /// Remove a user message. Bot replies paired with it stay.
    pub async fn delete(&self, user_id: &str, message_id: &str) -> Result<()> {
        require("userId", user_id)?;
        require("messageId", message_id)?;

        let _guard = self.locks.acquire(user_id).await;
        let log = self.load_existing(user_id).await?;
        self.ensure_user_authored(&log, message_id)?;

        self.bounded("delete_field", self.store.delete_field(user_id, message_id))
            .await?;

        info!(user_id, message_id, "Deleted user message");
        Ok(())
    }

    /// All entries of a user's log in display order.
    pub async fn history(&self, user_id: &str) -> Result<Vec<MessageEntry>> {
        require("userId", user_id)?;

        let log = self.load_existing(user_id).await?;
        Ok(log.ordered().into_iter().cloned().collect())
    }

    async fn load_existing(&self, user_id: &str) -> Result<MessageLog> {
        self.bounded("get", self.store.get(user_id))
            .await?
            .ok_or_else(|| {
                warn!(user_id, "No message log for user");
                LogError::UserNotFound(user_id.to_string())
            })
    }

    /// Bot entries are reported as missing rather than forbidden.
    fn ensure_user_authored(&self, log: &MessageLog, message_id: &str) -> Result<()> {
        match log.get(message_id) {
            Some(entry) if entry.is_user() => Ok(()),
            _ => {
                warn!(user_id = %log.user_id, message_id, "Message not found for user");
                Err(message_not_found(&log.user_id, message_id))
            }
        }
    }

    /// A user id and its bot id, neither already present in `log`.
    fn allocate_pair(&self, log: Option<&MessageLog>) -> (String, String) {
        loop {
            let user_message_id = self.clock.tick();
            let bot_reply_id = user_message_id + BOT_REPLY_OFFSET_MS;
            let (user_message_id, bot_reply_id) =
                (user_message_id.to_string(), bot_reply_id.to_string());

            let taken = log.is_some_and(|log| {
                log.contains(&user_message_id) || log.contains(&bot_reply_id)
            });
            if !taken {
                return (user_message_id, bot_reply_id);
            }
        }
    }

    fn allocate_bot_id(&self, log: &MessageLog) -> String {
        loop {
            let bot_reply_id = (self.clock.tick() + BOT_REPLY_OFFSET_MS).to_string();
            if !log.contains(&bot_reply_id) {
                return bot_reply_id;
            }
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = chat_store::Result<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                error!(operation, error = %err, "Storage call failed");
                Err(err.into())
            }
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Storage call timed out"
                );
                Err(LogError::StorageUnavailable(format!(
                    "{operation} timed out after {:?}",
                    self.config.store_timeout
                )))
            }
        }
    }
}
