//! Query front-end over a [`SymbolIndex`]

use crate::cache::{CacheStats, QueryCache};
use crate::error::IndexError;
use crate::query::{ALL_SYMBOLS, QueryMode, QueryResult};
use crate::SymbolIndex;
use ccgraph_core::{HeaderFilter, Occurrence};

/// Wraps a symbol index with header filtering and optional memoization.
pub struct IndexClient<I> {
    index: I,
    headers: HeaderFilter,
    cache: Option<QueryCache>,
    queries: usize,
}

impl<I: SymbolIndex> IndexClient<I> {
    pub fn new(index: I, headers: HeaderFilter) -> Self {
        IndexClient {
            index,
            headers,
            cache: None,
            queries: 0,
        }
    }

    /// Remember every result for the rest of the run.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(QueryCache::new());
        self
    }

    /// Run one query, answering from the cache when possible.
    pub fn query(&mut self, mode: QueryMode, pattern: &str) -> Result<QueryResult, IndexError> {
        if let Some(cached) = self.cache.as_mut().and_then(|c| c.get(mode, pattern)) {
            return Ok(cached.clone());
        }

        self.queries += 1;
        let lines = self.index.lookup(mode, pattern)?;
        let result = QueryResult::from_lines(lines, &self.headers);

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(mode, pattern, result.clone());
        }
        Ok(result)
    }

    /// Definition sites of `symbol`, in index output order.
    pub fn definitions(&mut self, symbol: &str) -> Result<Vec<Occurrence>, IndexError> {
        Ok(self.query(QueryMode::Definition, symbol)?.occurrences)
    }

    /// Call sites inside `symbol`; each occurrence names the callee.
    pub fn callees(&mut self, symbol: &str) -> Result<QueryResult, IndexError> {
        self.query(QueryMode::Callees, symbol)
    }

    /// Call sites of `symbol`; each occurrence names the caller.
    pub fn callers(&mut self, symbol: &str) -> Result<QueryResult, IndexError> {
        self.query(QueryMode::Callers, symbol)
    }

    /// Every function that is called somewhere, sorted by name.
    pub fn all_functions(&mut self) -> Result<Vec<String>, IndexError> {
        Ok(self
            .query(QueryMode::Callees, ALL_SYMBOLS)?
            .symbols
            .into_iter()
            .collect())
    }

    /// Number of queries that reached the underlying index.
    pub fn queries_issued(&self) -> usize {
        self.queries
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(QueryCache::stats)
    }

    pub fn index(&self) -> &I {
        &self.index
    }
}
