use axum::Json;
use serde_json::{json, Value};

/// Liveness check; needs no API key.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
