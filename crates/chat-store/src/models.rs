//! Message log models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Who wrote a message entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

impl Author {
    /// Stored representation ("user" or "bot").
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Author {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Author::User),
            "bot" => Ok(Author::Bot),
            other => Err(StoreError::UnknownAuthor(other.to_string())),
        }
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    /// Millisecond-derived id, unique within the user's log.
    pub id: String,
    /// Message text.
    pub text: String,
    /// Author of the turn.
    #[serde(rename = "by")]
    pub author: Author,
}

impl MessageEntry {
    /// Create a user-authored entry.
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: Author::User,
        }
    }

    /// Create a bot-authored entry.
    pub fn bot(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: Author::Bot,
        }
    }

    /// Whether the entry was written by the user.
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}

/// All entries for one user, keyed by message id.
///
/// Key order is not meaningful; use [`MessageLog::ordered`] for display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    /// Owner of the log.
    pub user_id: String,
    entries: BTreeMap<String, MessageEntry>,
}

impl MessageLog {
    /// Create an empty log for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Create a log from existing entries.
    pub fn with_entries<I>(user_id: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = MessageEntry>,
    {
        let mut log = Self::new(user_id);
        for entry in entries {
            log.upsert(entry);
        }
        log
    }

    /// Look up an entry by id.
    pub fn get(&self, message_id: &str) -> Option<&MessageEntry> {
        self.entries.get(message_id)
    }

    /// Whether an entry with this id exists.
    pub fn contains(&self, message_id: &str) -> bool {
        self.entries.contains_key(message_id)
    }

    /// Insert or replace the entry stored under its id.
    pub fn upsert(&mut self, entry: MessageEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Remove an entry, returning it if present.
    pub fn remove(&mut self, message_id: &str) -> Option<MessageEntry> {
        self.entries.remove(message_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.values()
    }

    /// Entries sorted numerically by id. Non-numeric ids sort last.
    pub fn ordered(&self) -> Vec<&MessageEntry> {
        let mut ordered: Vec<&MessageEntry> = self.entries.values().collect();
        ordered.sort_by_cached_key(|entry| {
            let numeric = entry.id.parse::<u64>().ok();
            (numeric.is_none(), numeric, entry.id.clone())
        });
        ordered
    }
}
