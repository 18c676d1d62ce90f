//! DOT rendering of a graph and atomic output

use crate::error::RenderError;
use crate::graph::Graph;
use petgraph::dot::{Config, Dot};
use petgraph::visit::EdgeRef;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Include the directory line in node labels.
    pub show_folder: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { show_folder: true }
    }
}

/// Escape a label for use inside a double-quoted DOT string.
pub fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render the graph as Graphviz DOT text.
pub fn to_dot(graph: &Graph, options: &RenderOptions) -> String {
    let inner = graph.inner();
    let node_attrs = |_, (_, node): (_, &crate::model::GraphNode)| {
        format!("label = \"{}\" ", escape_label(&node.label(options.show_folder)))
    };
    let dot = Dot::with_attr_getters(
        inner,
        &[Config::NodeNoLabel, Config::EdgeNoLabel],
        &|_, edge| match &edge.weight().label {
            Some(label) => format!("label = \"{}\" ", escape_label(label)),
            None => String::new(),
        },
        &node_attrs,
    );
    format!("{dot}")
}

/// Write the graph to `path`. The file is replaced in one step, so a
/// failure never leaves a partially written graph behind.
pub fn write_dot(graph: &Graph, path: &Path, options: &RenderOptions) -> Result<(), RenderError> {
    let to_error = |source: std::io::Error| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(to_error)?;
    file.write_all(to_dot(graph, options).as_bytes())
        .map_err(to_error)?;
    file.flush().map_err(to_error)?;
    file.persist(path).map_err(|e| to_error(e.error))?;

    tracing::info!(
        "Wrote {} ({} nodes, {} edges)",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(())
}
