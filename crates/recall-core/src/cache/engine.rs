use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::policy::EvictionPolicy;

/// Cached answer payload plus the metadata the eviction policies need.
#[derive(Debug, Clone)]
struct CacheEntry {
    question_id: i64,
    question_title: String,
    llm_answer: String,
    original_answer: String,
    score: f64,
    created: Instant,
    last_access: Instant,
    access_count: u64,
    seq: u64,
}

/// Snapshot handed out on a cache hit.
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub question_id: i64,
    pub question_title: String,
    pub llm_answer: String,
    pub original_answer: String,
    pub score: f64,
    pub access_count: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheCounters {
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Bounded in-memory cache of scored answers.
///
/// Keys are question digests (see [`super::key::question_key`]); a
/// secondary index maps `question_id` to its key so the read path can
/// resolve by id. Entries expire after `ttl` and one victim is evicted
/// per insert once `max_size` is reached, selected by `policy`.
pub struct AnswerCache {
    max_size: usize,
    policy: EvictionPolicy,
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
    by_id: HashMap<i64, String>,
    counters: CacheCounters,
    next_seq: u64,
}

impl AnswerCache {
    pub fn new(max_size: usize, policy: EvictionPolicy, ttl: Duration) -> Self {
        Self {
            max_size,
            policy,
            ttl,
            entries: HashMap::new(),
            by_id: HashMap::new(),
            counters: CacheCounters::default(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn counters(&self) -> CacheCounters {
        self.counters
    }

    /// Looks up by key, counting a hit or miss and dropping the entry if
    /// its TTL has elapsed.
    pub fn get(&mut self, key: &str) -> Option<CacheHit> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            None => {
                self.counters.misses += 1;
                return None;
            }
            Some(e) => now.duration_since(e.created) > self.ttl,
        };
        if expired {
            self.remove_key(key);
            self.counters.expirations += 1;
            self.counters.misses += 1;
            return None;
        }

        let hit = self.entries.get_mut(key).map(|e| {
            e.access_count += 1;
            e.last_access = now;
            CacheHit {
                question_id: e.question_id,
                question_title: e.question_title.clone(),
                llm_answer: e.llm_answer.clone(),
                original_answer: e.original_answer.clone(),
                score: e.score,
                access_count: e.access_count,
            }
        });
        if hit.is_some() {
            self.counters.hits += 1;
        }
        hit
    }

    /// Looks up by `question_id` via the secondary index.
    pub fn get_by_id(&mut self, question_id: i64) -> Option<CacheHit> {
        match self.by_id.get(&question_id).cloned() {
            Some(key) => self.get(&key),
            None => {
                self.counters.misses += 1;
                None
            }
        }
    }

    /// Admits an answer. Re-inserting an existing key only bumps its
    /// counters; the cached answer stays as first seen.
    pub fn insert(
        &mut self,
        key: String,
        question_id: i64,
        question_title: &str,
        llm_answer: &str,
        original_answer: &str,
        score: f64,
    ) {
        if self.max_size == 0 {
            return; // cache disabled
        }
        let now = Instant::now();
        if let Some(e) = self.entries.get_mut(&key) {
            e.access_count += 1;
            e.last_access = now;
            // another question id may map to the same normalized text
            self.by_id.insert(question_id, key);
            return;
        }
        if self.entries.len() >= self.max_size {
            self.evict_one();
        }
        self.by_id.insert(question_id, key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                question_id,
                question_title: question_title.to_string(),
                llm_answer: llm_answer.to_string(),
                original_answer: original_answer.to_string(),
                score,
                created: now,
                last_access: now,
                access_count: 1,
                seq: self.next_seq,
            },
        );
        self.next_seq += 1;
        self.counters.insertions += 1;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_id.clear();
        self.counters = CacheCounters::default();
    }

    fn remove_key(&mut self, key: &str) {
        if let Some(e) = self.entries.remove(key) {
            self.by_id.remove(&e.question_id);
        }
    }

    fn evict_one(&mut self) {
        let victim = match self.policy {
            EvictionPolicy::Lru => self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_access)
                .map(|(k, _)| k.clone()),
            EvictionPolicy::Lfu => self
                .entries
                .iter()
                .min_by_key(|(_, e)| (e.access_count, e.seq))
                .map(|(k, _)| k.clone()),
            EvictionPolicy::Fifo => self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.seq)
                .map(|(k, _)| k.clone()),
        };
        if let Some(key) = victim {
            self.remove_key(&key);
            self.counters.evictions += 1;
            tracing::debug!(policy = self.policy.as_str(), "evicted cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    fn cache(max: usize, policy: EvictionPolicy) -> AnswerCache {
        AnswerCache::new(max, policy, TTL)
    }

    fn put(c: &mut AnswerCache, key: &str, qid: i64) {
        c.insert(key.to_string(), qid, "title", "answer", "reference", 0.5);
    }

    #[test]
    fn hit_bumps_access_count() {
        let mut c = cache(4, EvictionPolicy::Lru);
        put(&mut c, "k1", 1);
        let first = c.get("k1").unwrap();
        let second = c.get("k1").unwrap();
        assert_eq!(first.access_count, 2);
        assert_eq!(second.access_count, 3);
        assert_eq!(c.counters().hits, 2);
    }

    #[test]
    fn miss_is_counted() {
        let mut c = cache(4, EvictionPolicy::Lru);
        assert!(c.get("absent").is_none());
        assert_eq!(c.counters().misses, 1);
    }

    #[test]
    fn lookup_by_id_resolves_through_index() {
        let mut c = cache(4, EvictionPolicy::Lru);
        put(&mut c, "k1", 42);
        let hit = c.get_by_id(42).unwrap();
        assert_eq!(hit.question_id, 42);
        assert!(c.get_by_id(7).is_none());
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let mut c = cache(2, EvictionPolicy::Lru);
        put(&mut c, "a", 1);
        put(&mut c, "b", 2);
        c.get("a"); // refresh a; b is now the LRU victim
        put(&mut c, "c", 3);
        assert!(c.get("b").is_none());
        assert!(c.get("a").is_some());
        assert!(c.get("c").is_some());
        assert_eq!(c.counters().evictions, 1);
    }

    #[test]
    fn lfu_evicts_least_frequently_used() {
        let mut c = cache(2, EvictionPolicy::Lfu);
        put(&mut c, "a", 1);
        put(&mut c, "b", 2);
        c.get("a");
        c.get("a"); // a: 3 accesses, b: 1
        put(&mut c, "c", 3);
        assert!(c.get("b").is_none());
        assert!(c.get("a").is_some());
    }

    #[test]
    fn fifo_evicts_oldest_insertion() {
        let mut c = cache(2, EvictionPolicy::Fifo);
        put(&mut c, "a", 1);
        put(&mut c, "b", 2);
        c.get("a"); // access order must not matter for FIFO
        put(&mut c, "c", 3);
        assert!(c.get("a").is_none());
        assert!(c.get("b").is_some());
    }

    #[test]
    fn expired_entry_counts_as_miss() {
        let mut c = AnswerCache::new(4, EvictionPolicy::Lru, Duration::from_millis(1));
        put(&mut c, "k1", 1);
        std::thread::sleep(Duration::from_millis(10));
        assert!(c.get("k1").is_none());
        assert_eq!(c.counters().expirations, 1);
        assert_eq!(c.counters().misses, 1);
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn reinsert_keeps_first_answer() {
        let mut c = cache(4, EvictionPolicy::Lru);
        c.insert("k1".into(), 1, "t", "first", "ref", 0.9);
        c.insert("k1".into(), 1, "t", "second", "ref", 0.1);
        let hit = c.get("k1").unwrap();
        assert_eq!(hit.llm_answer, "first");
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn zero_capacity_disables_the_cache() {
        let mut c = cache(0, EvictionPolicy::Lru);
        put(&mut c, "k1", 1);
        assert!(c.get("k1").is_none());
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn clear_resets_entries_and_counters() {
        let mut c = cache(4, EvictionPolicy::Lru);
        put(&mut c, "k1", 1);
        c.get("k1");
        c.get("missing");
        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.counters().hits, 0);
        assert_eq!(c.counters().misses, 0);
    }
}
