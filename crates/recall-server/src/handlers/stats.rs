use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::error::internal_error;
use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let cache = state.service.cache_snapshot();
    match state.service.storage_stats() {
        Ok(storage) => (
            StatusCode::OK,
            Json(json!({
                "cache": cache,
                "storage": storage,
            })),
        ),
        Err(e) => internal_error(e),
    }
}
