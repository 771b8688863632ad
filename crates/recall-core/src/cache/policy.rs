use std::fmt;
use std::str::FromStr;

/// Victim-selection policy for the in-memory answer cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Least recently used.
    Lru,
    /// Least frequently used, insertion order as tiebreak.
    Lfu,
    /// First in, first out.
    Fifo,
}

impl EvictionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Lfu => "LFU",
            EvictionPolicy::Fifo => "FIFO",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LRU" => Ok(EvictionPolicy::Lru),
            "LFU" => Ok(EvictionPolicy::Lfu),
            "FIFO" => Ok(EvictionPolicy::Fifo),
            other => anyhow::bail!(
                "unknown cache policy '{}' (expected LRU, LFU or FIFO)",
                other
            ),
        }
    }
}
