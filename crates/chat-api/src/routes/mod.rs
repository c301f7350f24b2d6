//! Route definitions for the chat API.

mod health;
mod messages;

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::state::AppState;

/// Create the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/sendMessage", post(messages::send_message))
        .route("/editMessage", post(messages::edit_message))
        .route("/deleteMessage", delete(messages::delete_message))
        .route("/messages/:user_id", get(messages::list_messages))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
