//! Error types for configuration and rendering

use std::path::PathBuf;

/// Failure to load, merge, or persist the configuration sidecar.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid ignore pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Failure to write a rendered graph.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot write graph to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
