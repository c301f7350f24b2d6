//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{MessageEntry, MessageLog};
use crate::DocumentStore;

/// Keeps every user's log in process memory. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    logs: RwLock<HashMap<String, MessageLog>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user documents held.
    pub async fn user_count(&self) -> usize {
        self.logs.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, user_id: &str) -> Result<Option<MessageLog>> {
        let logs = self.logs.read().await;
        Ok(logs.get(user_id).cloned())
    }

    async fn merge_set(&self, user_id: &str, entries: &[MessageEntry]) -> Result<()> {
        let mut logs = self.logs.write().await;
        let log = logs
            .entry(user_id.to_string())
            .or_insert_with(|| MessageLog::new(user_id));

        for entry in entries {
            log.upsert(entry.clone());
        }
        Ok(())
    }

    async fn overwrite(&self, log: &MessageLog) -> Result<()> {
        let mut logs = self.logs.write().await;
        logs.insert(log.user_id.clone(), log.clone());
        Ok(())
    }

    async fn delete_field(&self, user_id: &str, message_id: &str) -> Result<()> {
        let mut logs = self.logs.write().await;
        if let Some(log) = logs.get_mut(user_id) {
            log.remove(message_id);
        }
        Ok(())
    }
}
