//! Symbol index queries and call-relation traversal

pub mod cache;
pub mod client;
pub mod cscope;
pub mod error;
pub mod query;
pub mod resolver;
pub mod traversal;

#[cfg(test)]
pub mod test_utils;


pub use cache::{CacheStats, QueryCache};
pub use client::IndexClient;
pub use cscope::CscopeIndex;
pub use error::IndexError;
pub use query::{QueryMode, QueryResult, RawLine, parse_output};
pub use resolver::resolve_symbol;
pub use traversal::{CallRelation, Seed, TraversalOptions, TraversalStats, WorkOrder, traverse};

/// A cross-reference index that can be asked about symbols.
pub trait SymbolIndex {
    /// Run one query and return the tokenized output lines, in the order the
    /// index produced them.
    fn lookup(&mut self, mode: QueryMode, pattern: &str) -> Result<Vec<RawLine>, IndexError>;
}
