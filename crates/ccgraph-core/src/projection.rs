//! Projection of the raw call relation onto function, file, or folder granularity

use crate::graph::Graph;
use crate::model::{GraphNode, NodeKind};
use std::path::{Path, PathBuf};

/// Which view of the call relation to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Projection {
    Call,
    File,
    Folder,
}

impl Projection {
    pub const ALL: [Projection; 3] = [Projection::Call, Projection::File, Projection::Folder];

    /// Output file stem for this view.
    pub fn file_stem(self) -> &'static str {
        match self {
            Projection::Call => "callgraph",
            Projection::File => "filegraph",
            Projection::Folder => "foldergraph",
        }
    }

    /// Where this view is written inside `dir`.
    pub fn output_path(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.dot", self.file_stem()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectionOptions {
    /// Keep `f -> f` edges in the call graph.
    pub keep_self_loops: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        ProjectionOptions {
            keep_self_loops: true,
        }
    }
}

/// Project the call relation (function nodes, one edge per call site) onto a view.
pub fn project(relation: &Graph, projection: Projection, options: ProjectionOptions) -> Graph {
    match projection {
        Projection::Call => call_graph(relation, options),
        Projection::File => location_graph(relation, NodeKind::File),
        Projection::Folder => location_graph(relation, NodeKind::Directory),
    }
}

fn call_graph(relation: &Graph, options: ProjectionOptions) -> Graph {
    let mut graph = Graph::new();

    for node in relation.all_nodes() {
        graph.add_node(node.clone());
    }

    for edge in relation.all_edges() {
        if edge.source == edge.target && !options.keep_self_loops {
            continue;
        }
        let (Some(caller), Some(callee)) = (relation.node(edge.source), relation.node(edge.target))
        else {
            continue;
        };
        let source = graph.add_node(caller.clone());
        let target = graph.add_node(callee.clone());
        graph.add_edge(source, target, None, None);
    }

    graph
}

/// Path of the file or folder a function node belongs to. Files at the root
/// of the tree have no folder.
fn location_of(node: &GraphNode, kind: NodeKind) -> Option<PathBuf> {
    match kind {
        NodeKind::Directory => node
            .file_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf),
        _ => Some(node.file_path.clone()),
    }
}

fn location_node(path: &Path, kind: NodeKind) -> GraphNode {
    match kind {
        NodeKind::Directory => GraphNode::directory(path),
        _ => GraphNode::file(path),
    }
}

fn location_graph(relation: &Graph, kind: NodeKind) -> Graph {
    let mut graph = Graph::multigraph();

    for node in relation.all_nodes() {
        if let Some(location) = location_of(node, kind) {
            graph.add_node(location_node(&location, kind));
        }
    }

    for edge in relation.all_edges() {
        let (Some(caller), Some(callee)) = (relation.node(edge.source), relation.node(edge.target))
        else {
            continue;
        };

        let (Some(caller_location), Some(callee_location)) =
            (location_of(caller, kind), location_of(callee, kind))
        else {
            continue;
        };
        // Calls that stay inside one file/folder vanish at this granularity
        if caller_location == callee_location {
            continue;
        }

        let label = match kind {
            NodeKind::Directory => format!("{}:{}", caller.base_name(), callee.name),
            _ => {
                let line = edge.call_site.as_ref().map_or(callee.line, |site| site.line);
                format!("{}:{}", line, callee.name)
            }
        };

        let source = graph.add_node(location_node(&caller_location, kind));
        let target = graph.add_node(location_node(&callee_location, kind));
        graph.add_edge(source, target, Some(label), None);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CallSite, IdentityPolicy};
    use std::collections::BTreeSet;

    fn relation(calls: &[(&str, &str, &str, &str, u32)]) -> Graph {
        // (caller, caller file, callee, callee file, call line)
        let mut graph = Graph::multigraph();
        for &(caller, caller_file, callee, callee_file, line) in calls {
            let a = graph.add_node(GraphNode::function(
                caller,
                Path::new(caller_file),
                1,
                IdentityPolicy::Symbol,
            ));
            let b = graph.add_node(GraphNode::function(
                callee,
                Path::new(callee_file),
                1,
                IdentityPolicy::Symbol,
            ));
            graph.add_edge(
                a,
                b,
                None,
                Some(CallSite {
                    file: PathBuf::from(caller_file),
                    line,
                }),
            );
        }
        graph
    }

    #[test]
    fn call_graph_dedups_call_sites() {
        let rel = relation(&[
            ("alpha", "src/a.c", "beta", "src/b.c", 3),
            ("alpha", "src/a.c", "beta", "src/b.c", 9),
        ]);
        let graph = project(&rel, Projection::Call, ProjectionOptions::default());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn self_loops_follow_option() {
        let rel = relation(&[("fact", "m.c", "fact", "m.c", 4)]);
        let kept = project(&rel, Projection::Call, ProjectionOptions::default());
        assert_eq!(kept.edge_count(), 1);

        let dropped = project(
            &rel,
            Projection::Call,
            ProjectionOptions {
                keep_self_loops: false,
            },
        );
        assert_eq!(dropped.edge_count(), 0);
        assert_eq!(dropped.node_count(), 1);
    }

    #[test]
    fn file_graph_labels_call_line_and_callee() {
        let rel = relation(&[("alpha", "src/a.c", "beta", "src/b.c", 12)]);
        let graph = project(&rel, Projection::File, ProjectionOptions::default());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let edge = graph.all_edges().next().unwrap();
        assert_eq!(edge.label.as_deref(), Some("12:beta"));
        assert_eq!(graph.node(edge.source).unwrap().name, "src/a.c");
        assert_eq!(graph.node(edge.target).unwrap().name, "src/b.c");
    }

    #[test]
    fn file_graph_keeps_each_call_site() {
        let rel = relation(&[
            ("alpha", "a.c", "beta", "b.c", 3),
            ("alpha", "a.c", "beta", "b.c", 9),
            ("gamma", "a.c", "beta", "b.c", 9),
        ]);
        let graph = project(&rel, Projection::File, ProjectionOptions::default());
        // "9:beta" appears twice but collapses to a single parallel edge
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn same_file_calls_produce_no_file_edge() {
        let rel = relation(&[("alpha", "a.c", "helper", "a.c", 5)]);
        let graph = project(&rel, Projection::File, ProjectionOptions::default());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn folder_graph_collapses_shared_directory() {
        let rel = relation(&[("alpha", "src/a.c", "beta", "src/b.c", 2)]);
        let graph = project(&rel, Projection::Folder, ProjectionOptions::default());
        assert_eq!(graph.node_names(), BTreeSet::from(["src".to_string()]));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn folder_graph_labels_caller_file() {
        let rel = relation(&[("alpha", "app/a.c", "beta", "lib/b.c", 2)]);
        let graph = project(&rel, Projection::Folder, ProjectionOptions::default());
        let edge = graph.all_edges().next().unwrap();
        assert_eq!(edge.label.as_deref(), Some("a.c:beta"));
        assert_eq!(
            graph.edge_names(),
            BTreeSet::from([("app".to_string(), "lib".to_string())])
        );
    }

    #[test]
    fn root_level_files_have_no_folder() {
        let rel = relation(&[
            ("main", "main.c", "beta", "lib/b.c", 2),
            ("beta", "lib/b.c", "gamma", "net/c.c", 5),
        ]);
        let graph = project(&rel, Projection::Folder, ProjectionOptions::default());
        assert_eq!(
            graph.node_names(),
            BTreeSet::from(["lib".to_string(), "net".to_string()])
        );
        assert!(graph.find_node_by_name(".").is_none());
        assert_eq!(
            graph.edge_names(),
            BTreeSet::from([("lib".to_string(), "net".to_string())])
        );

        // the file view still shows the root-level caller
        let files = project(&rel, Projection::File, ProjectionOptions::default());
        assert!(files.find_node_by_name("main.c").is_some());
        assert_eq!(files.edge_count(), 2);
    }

    #[test]
    fn output_paths_are_named_by_view() {
        let dir = Path::new("/work");
        assert_eq!(Projection::Call.output_path(dir), Path::new("/work/callgraph.dot"));
        assert_eq!(Projection::File.output_path(dir), Path::new("/work/filegraph.dot"));
        assert_eq!(Projection::Folder.output_path(dir), Path::new("/work/foldergraph.dot"));
    }
}
