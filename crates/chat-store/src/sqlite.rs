//! SQLite-backed document store.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use crate::error::{Result, StoreError};
use crate::models::{Author, MessageEntry, MessageLog};
use crate::DocumentStore;

/// Stores each user's log as rows of `log_entries` under a `message_logs` row.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct EntryRow {
    message_id: String,
    text: String,
    author: String,
}

impl TryFrom<EntryRow> for MessageEntry {
    type Error = StoreError;

    fn try_from(row: EntryRow) -> Result<Self> {
        Ok(MessageEntry {
            id: row.message_id,
            text: row.text,
            author: Author::from_str(&row.author)?,
        })
    }
}

impl SqliteStore {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    ///
    /// In-memory databases (`sqlite::memory:`) are per connection, so use a
    /// pool size of 1 for them.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(url, pool_size, "Connected to message store");

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running message store migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn ensure_log(conn: &mut SqliteConnection, user_id: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO message_logs (user_id)
        VALUES (?)
        ON CONFLICT(user_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn upsert_entry(conn: &mut SqliteConnection, user_id: &str, entry: &MessageEntry) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO log_entries (user_id, message_id, text, author)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, message_id) DO UPDATE SET
            text = excluded.text,
            author = excluded.author,
            updated_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(&entry.id)
    .bind(&entry.text)
    .bind(entry.author.as_str())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, user_id: &str) -> Result<Option<MessageLog>> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM message_logs WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?
            > 0;

        if !exists {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT message_id, text, author
            FROM log_entries
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let entries = rows
            .into_iter()
            .map(MessageEntry::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(MessageLog::with_entries(user_id, entries)))
    }

    async fn merge_set(&self, user_id: &str, entries: &[MessageEntry]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        ensure_log(&mut *tx, user_id).await?;
        for entry in entries {
            upsert_entry(&mut *tx, user_id, entry).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn overwrite(&self, log: &MessageLog) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        ensure_log(&mut *tx, &log.user_id).await?;
        sqlx::query(
            r#"
            DELETE FROM log_entries
            WHERE user_id = ?
            "#,
        )
        .bind(&log.user_id)
        .execute(&mut *tx)
        .await?;

        for entry in log.entries() {
            upsert_entry(&mut *tx, &log.user_id, entry).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_field(&self, user_id: &str, message_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM log_entries
            WHERE user_id = ? AND message_id = ?
            "#,
        )
        .bind(user_id)
        .bind(message_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteStore {
        let store = SqliteStore::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let store = test_store().await;
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_set_creates_and_preserves() {
        let store = test_store().await;

        store
            .merge_set("u1", &[MessageEntry::user("1000", "hi"), MessageEntry::bot("2000", "hello")])
            .await
            .unwrap();
        store
            .merge_set("u1", &[MessageEntry::user("3000", "again")])
            .await
            .unwrap();

        let log = store.get("u1").await.unwrap().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.get("2000").unwrap().author, Author::Bot);

        let ids: Vec<&str> = log.ordered().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1000", "2000", "3000"]);
    }

    #[tokio::test]
    async fn test_merge_set_overwrites_same_id() {
        let store = test_store().await;

        store.merge_set("u1", &[MessageEntry::user("1", "old")]).await.unwrap();
        store.merge_set("u1", &[MessageEntry::user("1", "new")]).await.unwrap();

        let log = store.get("u1").await.unwrap().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.get("1").unwrap().text, "new");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_entries() {
        let store = test_store().await;
        store
            .merge_set("u1", &[MessageEntry::user("1", "a"), MessageEntry::bot("1001", "b")])
            .await
            .unwrap();

        let mut log = store.get("u1").await.unwrap().unwrap();
        log.remove("1001");
        log.upsert(MessageEntry::user("1", "edited"));
        store.overwrite(&log).await.unwrap();

        let stored = store.get("u1").await.unwrap().unwrap();
        assert_eq!(stored, log);
    }

    #[tokio::test]
    async fn test_delete_field_keeps_document() {
        let store = test_store().await;
        store.merge_set("u1", &[MessageEntry::user("1", "a")]).await.unwrap();

        store.delete_field("u1", "1").await.unwrap();

        let log = store.get("u1").await.unwrap().unwrap();
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = test_store().await;
        store.merge_set("u1", &[MessageEntry::user("1", "a")]).await.unwrap();
        store.merge_set("u2", &[MessageEntry::user("1", "b")]).await.unwrap();

        store.delete_field("u1", "1").await.unwrap();

        assert!(store.get("u1").await.unwrap().unwrap().is_empty());
        assert_eq!(store.get("u2").await.unwrap().unwrap().get("1").unwrap().text, "b");
    }
}
