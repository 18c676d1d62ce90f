//! Configuration sidecar stored next to the symbol database
//!
//! The sidecar is a JSON object. Keys this tool does not know about are
//! carried through untouched; keys it knows but the file lacks are filled
//! with defaults and written back.

use crate::error::ConfigError;
use crate::filter::{DEFAULT_HEADER_SUFFIXES, HeaderFilter, IgnoreSet};
use crate::model::IdentityPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sidecar file name, relative to the working directory.
pub const CONFIG_FILE: &str = ".callcallgraph.json";

/// Get the sidecar path for a working directory.
pub fn config_path(working_dir: &Path) -> PathBuf {
    working_dir.join(CONFIG_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Regexes; a symbol matching any of them at its start is left out.
    pub ignore_symbols: Vec<String>,
    /// Drop every occurrence located in a header file.
    pub ignore_header: bool,
    /// Include the directory line in node labels.
    pub show_folder: bool,
    pub header_suffixes: Vec<String>,
    pub node_identity: IdentityPolicy,
    /// Keep recursive call edges in the call graph.
    pub self_loops: bool,
    /// Memoize index queries for the duration of the run.
    pub cache_queries: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ignore_symbols: Vec::new(),
            ignore_header: true,
            show_folder: true,
            header_suffixes: DEFAULT_HEADER_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            node_identity: IdentityPolicy::Symbol,
            self_loops: true,
            cache_queries: true,
            extra: serde_json::Map::new(),
        }
    }
}

impl Config {
    /// Load the sidecar from `working_dir`, fill in defaults, and persist
    /// the merged result. A missing file is created with defaults.
    pub fn load_or_init(working_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_path(working_dir);
        let config = match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_json(&text).map_err(|source| ConfigError::Malformed {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config at {}, using defaults", path.display());
                Config::default()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        config.save(&path)?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_json().map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text + "\n").map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Config saved: {}", path.display());
        Ok(())
    }

    /// Compile `ignore_symbols`.
    pub fn ignore_set(&self) -> Result<IgnoreSet, ConfigError> {
        IgnoreSet::new(&self.ignore_symbols)
    }

    /// Header filter honouring `ignore_header`.
    pub fn header_filter(&self) -> HeaderFilter {
        if self.ignore_header {
            HeaderFilter::new(self.header_suffixes.iter().cloned())
        } else {
            HeaderFilter::disabled()
        }
    }
}
