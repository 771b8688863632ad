use crate::cache::policy::EvictionPolicy;
use anyhow::Context;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub cache_size: usize,
    pub cache_policy: EvictionPolicy,
    pub cache_ttl: Duration,
    pub score_method: String,
    pub max_concurrency: usize,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            db_path: PathBuf::from("recall.db"),
            cache_size: 100,
            cache_policy: EvictionPolicy::Lru,
            cache_ttl: Duration::from_secs(3600),
            score_method: "tfidf".to_string(),
            max_concurrency: 100,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from the environment on top of the defaults.
    /// Malformed numeric values fall back to the default; an unknown
    /// cache policy is a startup error.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("RECALL_HOST") {
            cfg.host = v;
        }
        if let Ok(v) = env::var("RECALL_PORT") {
            if let Ok(n) = v.parse() {
                cfg.port = n;
            }
        }
        if let Ok(v) = env::var("RECALL_DB") {
            cfg.db_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("RECALL_CACHE_SIZE") {
            if let Ok(n) = v.parse() {
                cfg.cache_size = n;
            }
        }
        if let Ok(v) = env::var("RECALL_CACHE_POLICY") {
            cfg.cache_policy = v
                .parse()
                .context("invalid RECALL_CACHE_POLICY")?;
        }
        if let Ok(v) = env::var("RECALL_CACHE_TTL_SECS") {
            if let Ok(n) = v.parse() {
                cfg.cache_ttl = Duration::from_secs(n);
            }
        }
        if let Ok(v) = env::var("RECALL_SCORE_METHOD") {
            cfg.score_method = v;
        }
        if let Ok(v) = env::var("RECALL_MAX_CONCURRENCY") {
            if let Ok(n) = v.parse() {
                cfg.max_concurrency = n;
            }
        }
        if let Ok(v) = env::var("RECALL_LOG") {
            cfg.log_level = v;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_port_3000() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.cache_policy, EvictionPolicy::Lru);
        assert_eq!(cfg.cache_ttl, Duration::from_secs(3600));
    }
}
