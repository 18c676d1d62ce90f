//! Core data structures for the call graph

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub u64);

/// Index of an edge inside a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeId(pub u64);

/// Line number carried by file and folder nodes.
pub const LOCATION_LINE: u32 = 0;

/// Discriminates what a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Function,
    File,
    Directory,
}

/// How function nodes are told apart within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// One node per symbol name. Same-named statics from different files merge.
    #[default]
    Symbol,
    /// One node per definition site.
    Definition,
}

/// Identity of a node. Two nodes are the same vertex iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKey {
    Symbol(String),
    Definition {
        symbol: String,
        file: PathBuf,
        line: u32,
    },
    Location {
        kind: NodeKind,
        path: PathBuf,
    },
}

/// A `(symbol, file, line)` triple reported by the symbol index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    pub symbol: String,
    pub file: PathBuf,
    pub line: u32,
}

impl Occurrence {
    pub fn new(symbol: impl Into<String>, file: impl Into<PathBuf>, line: u32) -> Self {
        Occurrence {
            symbol: symbol.into(),
            file: file.into(),
            line,
        }
    }
}

/// A single vertex: a function, or a file/folder standing in for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub key: NodeKey,
    pub kind: NodeKind,
    /// Function name, or the path itself for location nodes.
    pub name: String,
    pub file_path: PathBuf,
    pub line: u32,
}

impl GraphNode {
    /// Build a function node from the site where `symbol` is defined.
    pub fn function(symbol: &str, file: &Path, line: u32, policy: IdentityPolicy) -> Self {
        let key = match policy {
            IdentityPolicy::Symbol => NodeKey::Symbol(symbol.to_string()),
            IdentityPolicy::Definition => NodeKey::Definition {
                symbol: symbol.to_string(),
                file: file.to_path_buf(),
                line,
            },
        };
        GraphNode {
            key,
            kind: NodeKind::Function,
            name: symbol.to_string(),
            file_path: file.to_path_buf(),
            line,
        }
    }

    /// Pseudo-node for a source file.
    pub fn file(path: &Path) -> Self {
        Self::location(NodeKind::File, path)
    }

    /// Pseudo-node for a directory.
    pub fn directory(path: &Path) -> Self {
        Self::location(NodeKind::Directory, path)
    }

    fn location(kind: NodeKind, path: &Path) -> Self {
        GraphNode {
            key: NodeKey::Location {
                kind,
                path: path.to_path_buf(),
            },
            kind,
            name: path.to_string_lossy().into_owned(),
            file_path: path.to_path_buf(),
            line: LOCATION_LINE,
        }
    }

    /// Final component of the file path.
    pub fn base_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Containing directory of the file path; empty for files at the root.
    pub fn dir_name(&self) -> String {
        self.file_path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Multi-line display label used when rendering.
    pub fn label(&self, show_folder: bool) -> String {
        let dir = self.dir_name();
        let mut lines = Vec::with_capacity(3);
        match self.kind {
            NodeKind::Function => {
                if show_folder && !dir.is_empty() {
                    lines.push(dir);
                }
                lines.push(format!("{}:{}", self.base_name(), self.line));
                lines.push(self.name.clone());
            }
            NodeKind::File => {
                if show_folder && !dir.is_empty() {
                    lines.push(dir);
                }
                lines.push(self.base_name());
            }
            NodeKind::Directory => lines.push(self.name.clone()),
        }
        lines.join("\n")
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Where a call happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub file: PathBuf,
    pub line: u32,
}

/// A directed edge in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    /// Human-readable label.
    pub label: Option<String>,
    pub call_site: Option<CallSite>,
}

impl fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label.as_deref().unwrap_or_default())
    }
}
