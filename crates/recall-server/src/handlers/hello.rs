use axum::Json;
use serde_json::{json, Value};

/// The original backend greeting, byte-for-byte.
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hola desde el backend ??" }))
}
