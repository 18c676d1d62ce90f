//! Symbol and header filtering

use crate::error::ConfigError;
use regex::Regex;
use std::path::Path;

/// Header suffixes recognised when no list is configured.
pub const DEFAULT_HEADER_SUFFIXES: &[&str] = &[".h", ".hh", ".hpp", ".hxx"];

/// Compiled ignore patterns. A symbol is ignored when any pattern matches
/// at the start of its name; the rest of the name is unconstrained.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Regex>,
}

impl IgnoreSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IgnoreSet { patterns })
    }

    pub fn is_ignored(&self, symbol: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(symbol))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Drops occurrences located in header files.
#[derive(Debug, Clone, Default)]
pub struct HeaderFilter {
    suffixes: Vec<String>,
}

impl HeaderFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HeaderFilter {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A filter that lets every file through.
    pub fn disabled() -> Self {
        HeaderFilter::default()
    }

    pub fn is_header(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.suffixes.iter().any(|s| path.ends_with(s.as_str()))
    }
}
