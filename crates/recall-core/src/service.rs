use crate::cache::engine::{AnswerCache, CacheCounters};
use crate::cache::key::question_key;
use crate::model::{LookupResult, NewResult, QueryResult, StorageStats, StoreOutcome};
use crate::scoring::{ScoreReport, Scorer};
use crate::storage::store::Store;
use std::sync::{Arc, Mutex};

/// Outcome of a submission: what the store did plus the fresh score.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub outcome: StoreOutcome,
    pub score: f64,
    pub details: serde_json::Value,
}

/// Point-in-time view of the cache for health/stats endpoints.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheSnapshot {
    pub size: usize,
    pub max_size: usize,
    pub policy: String,
    pub ttl_secs: u64,
    #[serde(flatten)]
    pub counters: CacheCounters,
    pub hit_rate: f64,
    pub miss_rate: f64,
}

/// The scored-answer cache service: a bounded in-memory cache in front
/// of the persistent store, with answer scoring on the write path.
pub struct AnswerCacheService {
    store: Store,
    cache: Mutex<AnswerCache>,
    scorers: Vec<Arc<dyn Scorer>>,
    default_method: String,
}

impl AnswerCacheService {
    pub fn new(
        store: Store,
        cache: AnswerCache,
        scorers: Vec<Arc<dyn Scorer>>,
        default_method: String,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!scorers.is_empty(), "at least one scorer is required");
        anyhow::ensure!(
            scorers.iter().any(|s| s.name() == default_method),
            "unknown default score method '{}'",
            default_method
        );
        Ok(Self {
            store,
            cache: Mutex::new(cache),
            scorers,
            default_method,
        })
    }

    pub fn score_methods(&self) -> Vec<&'static str> {
        self.scorers.iter().map(|s| s.name()).collect()
    }

    pub fn default_method(&self) -> &str {
        &self.default_method
    }

    fn scorer(&self, method: Option<&str>) -> anyhow::Result<&dyn Scorer> {
        let name = method.unwrap_or(&self.default_method);
        self.scorers
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
            .ok_or_else(|| anyhow::anyhow!("unknown score method '{}'", name))
    }

    /// Scores the submitted answer and persists it (insert or counter
    /// increment), then admits it to the in-memory cache.
    pub fn submit(&self, new: &NewResult, method: Option<&str>) -> anyhow::Result<SubmitOutcome> {
        let ScoreReport { score, details } = self
            .scorer(method)?
            .score(&new.llm_answer, &new.original_answer);
        let outcome = self.store.upsert_result(new, score)?;

        let key = question_key(&new.question_title, &new.question_content);
        self.cache.lock().unwrap().insert(
            key,
            new.question_id,
            &new.question_title,
            &new.llm_answer,
            &new.original_answer,
            score,
        );

        tracing::info!(
            question_id = new.question_id,
            score,
            created = outcome.created,
            "stored scored answer"
        );
        Ok(SubmitOutcome {
            outcome,
            score,
            details,
        })
    }

    /// Serves a stored result by `question_id`: memory cache first, store
    /// fallback with cache re-admission. Every successful read bumps the
    /// persisted access counters.
    pub fn lookup(&self, question_id: i64) -> anyhow::Result<Option<LookupResult>> {
        let cached = self.cache.lock().unwrap().get_by_id(question_id);
        if let Some(hit) = cached {
            match self.store.record_access(question_id)? {
                Some(access_count) => {
                    tracing::debug!(question_id, access_count, "cache hit");
                    return Ok(Some(LookupResult {
                        question_id,
                        question_title: hit.question_title,
                        llm_answer: hit.llm_answer,
                        score: hit.score,
                        access_count,
                        from_cache: true,
                    }));
                }
                // cached but no longer persisted: treat as unknown
                None => return Ok(None),
            }
        }

        let Some(row) = self.store.find_by_question_id(question_id)? else {
            return Ok(None);
        };
        let access_count = self
            .store
            .record_access(question_id)?
            .unwrap_or(row.access_count + 1);
        self.admit(&row);
        tracing::debug!(question_id, access_count, "cache miss served from store");
        Ok(Some(LookupResult {
            question_id,
            question_title: row.question_title,
            llm_answer: row.llm_answer,
            score: row.score,
            access_count,
            from_cache: false,
        }))
    }

    fn admit(&self, row: &QueryResult) {
        let key = question_key(&row.question_title, &row.question_content);
        self.cache.lock().unwrap().insert(
            key,
            row.question_id,
            &row.question_title,
            &row.llm_answer,
            &row.original_answer,
            row.score,
        );
    }

    pub fn recent(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<QueryResult>> {
        self.store.recent(limit, offset)
    }

    pub fn storage_stats(&self) -> anyhow::Result<StorageStats> {
        self.store.stats()
    }

    pub fn cache_snapshot(&self) -> CacheSnapshot {
        let cache = self.cache.lock().unwrap();
        let counters = cache.counters();
        let total = counters.total_lookups();
        let pct = |n: u64| {
            if total == 0 {
                0.0
            } else {
                n as f64 / total as f64 * 100.0
            }
        };
        CacheSnapshot {
            size: cache.len(),
            max_size: cache.max_size(),
            policy: cache.policy().to_string(),
            ttl_secs: cache.ttl().as_secs(),
            counters,
            hit_rate: pct(counters.hits),
            miss_rate: pct(counters.misses),
        }
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap().clear();
        tracing::info!("cache cleared");
    }
}
