use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// Flushes the in-memory cache and resets its counters. Persisted rows
/// are untouched.
pub async fn clear_cache(State(state): State<AppState>) -> Json<Value> {
    state.service.clear_cache();
    Json(json!({ "status": "cleared" }))
}
