use std::sync::Arc;

use recall_core::cache::engine::AnswerCache;
use recall_core::config::ServiceConfig;
use recall_core::service::AnswerCacheService;
use recall_core::storage::store::Store;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnswerCacheService>,
}

/// Opens the store, applies the schema and wires the service with the
/// full scorer set.
pub fn build_state(cfg: &ServiceConfig) -> anyhow::Result<AppState> {
    let store = Store::open(&cfg.db_path)?;
    store.init_schema()?;
    let cache = AnswerCache::new(cfg.cache_size, cfg.cache_policy, cfg.cache_ttl);
    let service = AnswerCacheService::new(
        store,
        cache,
        recall_metrics::default_scorers(),
        cfg.score_method.clone(),
    )?;
    Ok(AppState {
        service: Arc::new(service),
    })
}
