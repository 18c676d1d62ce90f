//! Symbol index errors

use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("symbol database not found at {0}")]
    DatabaseMissing(PathBuf),
    #[error("cannot run indexer `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("indexer `{program}` failed ({status}): {stderr}")]
    QueryFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("root symbol `{0}` has no definition in the index")]
    UnresolvableRoot(String),
}
