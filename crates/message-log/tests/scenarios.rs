//! End-to-end message log scenarios against the built-in intent table.
//!
//! Run with:
//!   cargo test -p message-log --test scenarios

use std::sync::Arc;

use chat_store::{Author, DocumentStore, MemoryStore, SqliteStore};
use intent_brain::IntentResponder;
use message_log::{LogError, MessageLogService, BOT_REPLY_OFFSET_MS};

const AUTOMATION_REPLY: &str =
    "I can help you in automating your outbound an All-In-One, AI-First Platform powered by AI Employees";

fn service(store: Arc<dyn DocumentStore>) -> MessageLogService {
    MessageLogService::new(store, Arc::new(IntentResponder::builtin()))
}

// ============================================================================
// send
// ============================================================================

#[tokio::test]
async fn send_automation_question() {
    let service = service(Arc::new(MemoryStore::new()));

    let outcome = service.send("u1", "Can you automate outbound?").await.unwrap();

    assert_eq!(outcome.reply_text, AUTOMATION_REPLY);
    let user_id: u64 = outcome.user_message_id.parse().unwrap();
    let bot_id: u64 = outcome.bot_reply_id.parse().unwrap();
    assert_eq!(bot_id - user_id, BOT_REPLY_OFFSET_MS);
}

#[tokio::test]
async fn send_empty_text_is_invalid() {
    let service = service(Arc::new(MemoryStore::new()));

    let result = service.send("u1", "").await;
    assert!(matches!(result, Err(LogError::InvalidArgument(_))));
}

#[tokio::test]
async fn every_send_offsets_by_exactly_one_second() {
    let service = service(Arc::new(MemoryStore::new()));

    for text in ["hi", "schedule a call", "weather?", "xyz"] {
        let outcome = service.send("u1", text).await.unwrap();
        let user_id: u64 = outcome.user_message_id.parse().unwrap();
        let bot_id: u64 = outcome.bot_reply_id.parse().unwrap();
        assert_eq!(bot_id, user_id + 1000);
    }
}

// ============================================================================
// edit
// ============================================================================

#[tokio::test]
async fn edit_keeps_stale_reply_and_adds_new_one() {
    let store = Arc::new(MemoryStore::new());
    let service = service(store.clone());
    let sent = service.send("u1", "Tell me a joke").await.unwrap();
    let stale = store.get("u1").await.unwrap().unwrap().get(&sent.bot_reply_id).cloned().unwrap();

    let edited = service.edit("u1", &sent.user_message_id, "hello").await.unwrap();

    assert_eq!(edited.reply_text, "Hello! How can I assist you today?");
    let log = store.get("u1").await.unwrap().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log.get(&sent.user_message_id).unwrap().text, "hello");
    assert_eq!(log.get(&edited.bot_reply_id).unwrap().author, Author::Bot);
    assert_eq!(log.get(&sent.bot_reply_id), Some(&stale));
}

#[tokio::test]
async fn edit_unknown_user() {
    let service = service(Arc::new(MemoryStore::new()));

    let result = service.edit("b", "c", "a").await;
    assert!(matches!(result, Err(LogError::UserNotFound(user)) if user == "b"));
}

#[tokio::test]
async fn edit_unknown_message() {
    let service = service(Arc::new(MemoryStore::new()));
    service.send("u1", "hi").await.unwrap();

    let result = service.edit("u1", "c", "a").await;
    assert!(matches!(result, Err(LogError::MessageNotFound { .. })));
}

// ============================================================================
// delete
// ============================================================================

#[tokio::test]
async fn delete_ghost_user() {
    let service = service(Arc::new(MemoryStore::new()));

    let result = service.delete("ghost-user", "123").await;
    assert!(matches!(result, Err(LogError::UserNotFound(_))));
}

#[tokio::test]
async fn delete_round_trip_then_not_found() {
    let store = Arc::new(MemoryStore::new());
    let service = service(store.clone());
    let sent = service.send("u1", "hi").await.unwrap();

    service.delete("u1", &sent.user_message_id).await.unwrap();

    let log = store.get("u1").await.unwrap().unwrap();
    assert!(!log.contains(&sent.user_message_id));
    assert!(log.contains(&sent.bot_reply_id));

    assert!(matches!(
        service.delete("u1", &sent.user_message_id).await,
        Err(LogError::MessageNotFound { .. })
    ));
    assert!(matches!(
        service.edit("u1", &sent.user_message_id, "again").await,
        Err(LogError::MessageNotFound { .. })
    ));
}

#[tokio::test]
async fn delete_bot_reply_is_refused_as_not_found() {
    let store = Arc::new(MemoryStore::new());
    let service = service(store.clone());
    let sent = service.send("u1", "hi").await.unwrap();

    let result = service.delete("u1", &sent.bot_reply_id).await;

    assert!(matches!(result, Err(LogError::MessageNotFound { .. })));
    assert!(store.get("u1").await.unwrap().unwrap().contains(&sent.bot_reply_id));
}

#[tokio::test]
async fn emptied_log_still_exists() {
    let service = service(Arc::new(MemoryStore::new()));
    let sent = service.send("u1", "hi").await.unwrap();
    service.delete("u1", &sent.user_message_id).await.unwrap();

    // Only the bot reply is left; the user's log is still there.
    let history = service.history("u1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(matches!(
        service.delete("u1", "999").await,
        Err(LogError::MessageNotFound { .. })
    ));
}

// ============================================================================
// SQLite-backed
// ============================================================================

#[tokio::test]
async fn full_cycle_on_sqlite() {
    let store = SqliteStore::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    store.migrate().await.unwrap();
    let service = service(Arc::new(store));

    let sent = service.send("u1", "Can you automate outbound?").await.unwrap();
    let edited = service.edit("u1", &sent.user_message_id, "bye").await.unwrap();
    assert_eq!(edited.reply_text, "Goodbye! Feel free to reach out anytime.");

    service.delete("u1", &sent.user_message_id).await.unwrap();

    let history = service.history("u1").await.unwrap();
    let ids: Vec<&str> = history.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec![sent.bot_reply_id.as_str(), edited.bot_reply_id.as_str()]);
    assert!(history.iter().all(|entry| entry.author == Author::Bot));
}
