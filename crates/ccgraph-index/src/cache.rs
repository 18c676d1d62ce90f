//! Per-run query cache for avoiding redundant indexer invocations

use crate::query::{QueryMode, QueryResult};
use std::collections::HashMap;

/// Key for cache lookups
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct CacheKey {
    mode: QueryMode,
    pattern: String,
}

/// Results of earlier queries, keyed by mode and pattern. Lives for one run;
/// the index is assumed not to change underneath it.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<CacheKey, QueryResult>,
    hits: usize,
    misses: usize,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached result, counting the hit or miss.
    pub fn get(&mut self, mode: QueryMode, pattern: &str) -> Option<&QueryResult> {
        let key = CacheKey {
            mode,
            pattern: pattern.to_string(),
        };
        match self.entries.get(&key) {
            Some(result) => {
                self.hits += 1;
                Some(result)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a query result
    pub fn insert(&mut self, mode: QueryMode, pattern: &str, result: QueryResult) {
        let key = CacheKey {
            mode,
            pattern: pattern.to_string(),
        };
        self.entries.insert(key, result);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}
