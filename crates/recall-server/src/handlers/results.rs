use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use recall_core::model::NewResult;

use crate::error::{internal_error, unprocessable};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(flatten)]
    pub result: NewResult,
    /// Score method override; the configured default applies when absent.
    pub method: Option<String>,
}

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> (StatusCode, Json<Value>) {
    if req.result.llm_answer.trim().is_empty() || req.result.original_answer.trim().is_empty() {
        return unprocessable("llm_answer and original_answer must be non-empty");
    }
    if req.result.question_title.trim().is_empty() && req.result.question_content.trim().is_empty()
    {
        return unprocessable("question_title or question_content must be non-empty");
    }
    if let Some(method) = req.method.as_deref() {
        if !state.service.score_methods().iter().any(|m| *m == method) {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": format!("unknown score method '{}'", method),
                    "methods": state.service.score_methods(),
                })),
            );
        }
    }

    match state.service.submit(&req.result, req.method.as_deref()) {
        Ok(sub) => {
            let status = if sub.outcome.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (
                status,
                Json(json!({
                    "status": if sub.outcome.created { "created" } else { "updated" },
                    "id": sub.outcome.id,
                    "question_id": req.result.question_id,
                    "score": sub.score,
                    "access_count": sub.outcome.access_count,
                    "details": sub.details,
                })),
            )
        }
        Err(e) => internal_error(e),
    }
}

pub async fn lookup(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    match state.service.lookup(question_id) {
        Ok(Some(found)) => (
            StatusCode::OK,
            Json(json!({
                "question_id": found.question_id,
                "question_title": found.question_title,
                "llm_answer": found.llm_answer,
                "score": found.score,
                "access_count": found.access_count,
                "from_cache": found.from_cache,
            })),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("no result for question_id {}", question_id)
            })),
        ),
        Err(e) => internal_error(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> (StatusCode, Json<Value>) {
    let limit = params.limit.unwrap_or(100);
    let offset = params.offset.unwrap_or(0);
    if limit == 0 {
        return unprocessable("limit must be positive");
    }

    match state.service.recent(limit, offset) {
        Ok(rows) => {
            let count = rows.len();
            (
                StatusCode::OK,
                Json(json!({
                    "results": rows,
                    "count": count,
                    "limit": limit,
                    "offset": offset,
                })),
            )
        }
        Err(e) => internal_error(e),
    }
}
