//! Chat API server.
//!
//! Serves the message endpoints over an in-memory or SQLite store.
//!
//! ## Environment Variables
//!
//! - `APP_ENV`: `dev`, `test` or `prod`; selects `.env.<env>` (default: dev)
//! - `HOST`: Bind host (default: 0.0.0.0)
//! - `PORT`: Bind port (default: 5001)
//! - `API_SECRET_KEY`: Shared secret for the `x-api-key` header (required)
//! - `DATABASE_URL`: SQLite URL; omit to keep logs in memory
//! - `STORE_TIMEOUT_MS`: Storage call timeout (default: 5000)

use std::sync::Arc;

use chat_api::config::{self, Config, RuntimeEnv};
use chat_api::AppState;
use chat_store::{DocumentStore, MemoryStore, SqliteStore};
use intent_brain::{IntentResponder, Responder};
use message_log::{MessageLogConfig, MessageLogService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime_env = RuntimeEnv::from_env()?;
    config::load_env_files(runtime_env);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(env = %config.runtime_env, "Starting chat API");

    let store: Arc<dyn DocumentStore> = match &config.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let store = SqliteStore::connect(url).await?;
            store.migrate().await?;
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, message logs will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let responder = IntentResponder::builtin();
    info!(responder = responder.name(), "Responder ready");

    let service = MessageLogService::with_config(
        store,
        Arc::new(responder),
        MessageLogConfig {
            store_timeout: config.store_timeout,
        },
    );
    let state = AppState::new(service, config.api_secret_key.as_str());
    let app = chat_api::app(state);

    let listener = TcpListener::bind(config.addr).await?;
    info!("Chat API listening on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Chat API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
