use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let snap = state.service.cache_snapshot();
    Json(json!({
        "status": "ok",
        "cache_size": snap.size,
        "max_size": snap.max_size,
        "policy": snap.policy,
    }))
}
