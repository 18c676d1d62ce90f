//! In-memory symbol index for tests

use crate::error::IndexError;
use crate::query::{QueryMode, RawLine};
use crate::SymbolIndex;
use ccgraph_core::Occurrence;
use regex::Regex;

struct Call {
    caller: String,
    callee: String,
    file: String,
    line: u32,
}

/// A tiny codebase described by its definitions and call sites. Patterns are
/// matched as whole-name regexes, the way the wildcard query expects.
#[derive(Default)]
pub struct FakeIndex {
    definitions: Vec<Occurrence>,
    calls: Vec<Call>,
    lookups: usize,
}

impl FakeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// `symbol` is defined at `file:line`.
    pub fn define(mut self, symbol: &str, file: &str, line: u32) -> Self {
        self.definitions.push(Occurrence::new(symbol, file, line));
        self
    }

    /// `caller` calls `callee` at `file:line`.
    pub fn call(mut self, caller: &str, callee: &str, file: &str, line: u32) -> Self {
        self.calls.push(Call {
            caller: caller.to_string(),
            callee: callee.to_string(),
            file: file.to_string(),
            line,
        });
        self
    }

    /// How many queries reached this index.
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}

impl SymbolIndex for FakeIndex {
    fn lookup(&mut self, mode: QueryMode, pattern: &str) -> Result<Vec<RawLine>, IndexError> {
        self.lookups += 1;
        let re = Regex::new(&format!("^(?:{pattern})$")).expect("test pattern");

        let lines = match mode {
            QueryMode::Definition => self
                .definitions
                .iter()
                .filter(|d| re.is_match(&d.symbol))
                .cloned()
                .map(RawLine::from)
                .collect(),
            QueryMode::Callees => self
                .calls
                .iter()
                .filter(|c| re.is_match(&c.caller))
                .map(|c| RawLine::from(Occurrence::new(c.callee.as_str(), c.file.as_str(), c.line)))
                .collect(),
            QueryMode::Callers => self
                .calls
                .iter()
                .filter(|c| re.is_match(&c.callee))
                .map(|c| RawLine::from(Occurrence::new(c.caller.as_str(), c.file.as_str(), c.line)))
                .collect(),
        };
        Ok(lines)
    }
}
