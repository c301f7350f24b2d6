//! HTTP API over per-user message logs.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/api/v1/sendMessage` | `{ userId, text }` |
//! | `POST` | `/api/v1/editMessage` | `{ userId, messageId, newText }` |
//! | `DELETE` | `/api/v1/deleteMessage` | `{ userId, messageId }` |
//! | `GET` | `/api/v1/messages/:userId` | |
//! | `GET` | `/health` | |
//!
//! Everything under `/api/v1` requires the `x-api-key` header.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError, RuntimeEnv};
pub use error::{ApiError, ResponseCode};
pub use state::AppState;

/// Build the full application with its middleware stack.
pub fn app(state: AppState) -> axum::Router {
    routes::router(state)
}
