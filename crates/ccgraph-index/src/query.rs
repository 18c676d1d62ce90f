//! Query modes and normalisation of raw index output

use ccgraph_core::{HeaderFilter, Occurrence};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::PathBuf;

/// What to ask the symbol index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Where is this symbol defined.
    Definition,
    /// Which functions does this function call.
    Callees,
    /// Which functions call this function.
    Callers,
}

impl QueryMode {
    /// Numeric field index understood by cscope's line-oriented interface.
    pub fn number(self) -> u8 {
        match self {
            QueryMode::Definition => 1,
            QueryMode::Callees => 2,
            QueryMode::Callers => 3,
        }
    }

    pub fn flag(self) -> String {
        format!("-{}", self.number())
    }
}

/// Pattern that matches every function name.
pub const ALL_SYMBOLS: &str = ".*";

/// Parse line-oriented index output: `file symbol line [context...]`.
///
/// Lines with fewer than two tokens are dropped. Lines whose third token is
/// missing or not a number are kept without a line so their symbol name
/// still counts.
pub fn parse_output(text: &str) -> Vec<RawLine> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let file = tokens.next()?;
            let symbol = tokens.next()?;
            let line = tokens.next().and_then(|t| t.parse::<u32>().ok());
            Some(RawLine {
                file: PathBuf::from(file),
                symbol: symbol.to_string(),
                line,
            })
        })
        .collect()
}

/// One tokenized line of index output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub file: PathBuf,
    pub symbol: String,
    pub line: Option<u32>,
}

impl From<Occurrence> for RawLine {
    fn from(occurrence: Occurrence) -> Self {
        RawLine {
            file: occurrence.file,
            symbol: occurrence.symbol,
            line: Some(occurrence.line),
        }
    }
}

/// Normalised answer to one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Every symbol name the index reported, header files included.
    pub symbols: BTreeSet<String>,
    /// Occurrences outside filtered headers, deduplicated, in index output order.
    pub occurrences: Vec<Occurrence>,
}

impl QueryResult {
    pub fn from_lines(lines: Vec<RawLine>, headers: &HeaderFilter) -> Self {
        let mut result = QueryResult::default();
        let mut seen = HashSet::new();

        for raw in lines {
            result.symbols.insert(raw.symbol.clone());
            let Some(line) = raw.line else {
                continue;
            };
            if headers.is_header(&raw.file) {
                continue;
            }
            let occurrence = Occurrence {
                symbol: raw.symbol,
                file: raw.file,
                line,
            };
            if seen.insert(occurrence.clone()) {
                result.occurrences.push(occurrence);
            }
        }

        result
    }

    /// Occurrences grouped per file as `(symbol, line)` pairs.
    pub fn by_file(&self) -> BTreeMap<PathBuf, BTreeSet<(String, u32)>> {
        let mut grouped: BTreeMap<PathBuf, BTreeSet<(String, u32)>> = BTreeMap::new();
        for o in &self.occurrences {
            grouped
                .entry(o.file.clone())
                .or_default()
                .insert((o.symbol.clone(), o.line));
        }
        grouped
    }
}
