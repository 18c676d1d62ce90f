//! cscope-backed symbol index
//!
//! Every lookup runs `cscope -d -l -L [-f db] -<mode> <pattern>` in the
//! database directory and waits for it to exit. No timeout is applied; a
//! hung cscope hangs the caller.

use crate::error::IndexError;
use crate::query::{QueryMode, RawLine, parse_output};
use crate::SymbolIndex;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Program name used when none is configured.
pub const DEFAULT_PROGRAM: &str = "cscope";

/// Database name cscope looks for on its own.
pub const DEFAULT_DATABASE: &str = "cscope.out";

#[derive(Debug, Clone)]
pub struct CscopeIndex {
    program: String,
    working_dir: PathBuf,
    database: String,
}

impl CscopeIndex {
    /// Open the database at `database`. Its directory becomes the working
    /// directory for every query.
    pub fn open(database: &Path, program: impl Into<String>) -> Result<Self, IndexError> {
        if !database.is_file() {
            return Err(IndexError::DatabaseMissing(database.to_path_buf()));
        }
        let working_dir = match database.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let database = database
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Ok(CscopeIndex {
            program: program.into(),
            working_dir,
            database,
        })
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Build the command for one query without running it.
    pub fn command(&self, mode: QueryMode, pattern: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-d", "-l", "-L"]);
        if self.database != DEFAULT_DATABASE {
            cmd.arg("-f").arg(&self.database);
        }
        cmd.arg(mode.flag())
            .arg(pattern)
            .current_dir(&self.working_dir);
        cmd
    }
}

impl SymbolIndex for CscopeIndex {
    fn lookup(&mut self, mode: QueryMode, pattern: &str) -> Result<Vec<RawLine>, IndexError> {
        tracing::debug!("cscope {} {}", mode.flag(), pattern);

        let output = self
            .command(mode, pattern)
            .output()
            .map_err(|source| IndexError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(IndexError::QueryFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_output(&stdout))
    }
}
