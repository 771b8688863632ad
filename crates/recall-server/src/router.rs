use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/hello", get(handlers::hello::hello))
        .route("/health", get(handlers::health::health))
        .route(
            "/api/results",
            get(handlers::results::list).post(handlers::results::submit),
        )
        .route("/api/results/{question_id}", get(handlers::results::lookup))
        .route("/api/stats", get(handlers::stats::stats))
        .route("/api/cache/clear", post(handlers::admin::clear_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
