//! Shared-secret authentication.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Check the `x-api-key` header against the configured secret.
pub fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == &*state.api_key => Ok(()),
        Some(_) => {
            warn!("Rejected request with wrong API key");
            Err(ApiError::Unauthorized)
        }
        None => {
            warn!("Rejected request without API key");
            Err(ApiError::Unauthorized)
        }
    }
}

/// Middleware rejecting requests that fail [`authorize`] before any body is read.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(&state, request.headers())?;
    Ok(next.run(request).await)
}
