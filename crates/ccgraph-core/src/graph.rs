//! Graph wrapper using petgraph::StableDiGraph keyed by NodeKey

use crate::model::*;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// How parallel edges between the same pair of nodes are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// At most one edge per `(source, target)`.
    Simple,
    /// Parallel edges are kept as long as label or call site differ.
    Multi,
}

/// A directed graph whose nodes are deduplicated by [`NodeKey`].
pub struct Graph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    keys: HashMap<NodeKey, NodeIndex>,
    edge_policy: EdgePolicy,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("edge_policy", &self.edge_policy)
            .finish()
    }
}

impl Graph {
    /// Graph with at most one edge per node pair.
    pub fn new() -> Self {
        Self::with_policy(EdgePolicy::Simple)
    }

    /// Graph that keeps parallel edges with distinct labels.
    pub fn multigraph() -> Self {
        Self::with_policy(EdgePolicy::Multi)
    }

    pub fn with_policy(edge_policy: EdgePolicy) -> Self {
        Graph {
            inner: StableDiGraph::new(),
            keys: HashMap::new(),
            edge_policy,
        }
    }

    /// Add a node, or return the existing one with the same key.
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        if let Some(&idx) = self.keys.get(&node.key) {
            return NodeId(idx.index() as u64);
        }
        let key = node.key.clone();
        let idx = self.inner.add_node(node);
        self.keys.insert(key, idx);
        NodeId(idx.index() as u64)
    }

    /// Add an edge. Returns `None` when the edge is a duplicate under the
    /// graph's [`EdgePolicy`] or an endpoint is missing.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        label: Option<String>,
        call_site: Option<CallSite>,
    ) -> Option<EdgeId> {
        let source_idx = NodeIndex::new(source.0 as usize);
        let target_idx = NodeIndex::new(target.0 as usize);
        if !self.inner.contains_node(source_idx) || !self.inner.contains_node(target_idx) {
            return None;
        }

        let duplicate = self
            .inner
            .edges_directed(source_idx, Direction::Outgoing)
            .filter(|e| e.target() == target_idx)
            .any(|e| match self.edge_policy {
                EdgePolicy::Simple => true,
                EdgePolicy::Multi => {
                    e.weight().label == label && e.weight().call_site == call_site
                }
            });
        if duplicate {
            return None;
        }

        let edge = GraphEdge {
            source,
            target,
            label,
            call_site,
        };
        let idx = self.inner.add_edge(source_idx, target_idx, edge);
        Some(EdgeId(idx.index() as u64))
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        let idx = NodeIndex::new(id.0 as usize);
        self.inner.node_weight(idx)
    }

    /// Look up a node ID by identity key.
    pub fn node_id(&self, key: &NodeKey) -> Option<NodeId> {
        self.keys.get(key).map(|idx| NodeId(idx.index() as u64))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in insertion order.
    pub fn all_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Get all outgoing edges from a node.
    pub fn edges_from(&self, source: NodeId) -> impl Iterator<Item = &GraphEdge> {
        let idx = NodeIndex::new(source.0 as usize);
        self.inner
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge_ref| edge_ref.weight())
    }

    /// Get all incoming edges to a node.
    pub fn edges_to(&self, target: NodeId) -> impl Iterator<Item = &GraphEdge> {
        let idx = NodeIndex::new(target.0 as usize);
        self.inner
            .edges_directed(idx, Direction::Incoming)
            .map(|edge_ref| edge_ref.weight())
    }

    /// Check if any edge exists between two nodes.
    pub fn has_edge_between(&self, source: NodeId, target: NodeId) -> bool {
        self.edges_from(source).any(|e| e.target == target)
    }

    /// Find a node by name (first match).
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.inner
            .node_indices()
            .find(|&idx| {
                self.inner
                    .node_weight(idx)
                    .is_some_and(|n| n.name == name)
            })
            .map(|idx| NodeId(idx.index() as u64))
    }

    /// Node names, sorted.
    pub fn node_names(&self) -> BTreeSet<String> {
        self.all_nodes().map(|n| n.name.clone()).collect()
    }

    /// `(source name, target name)` for every edge, sorted and deduplicated.
    pub fn edge_names(&self) -> BTreeSet<(String, String)> {
        self.all_edges()
            .filter_map(|e| {
                let source = self.node(e.source)?;
                let target = self.node(e.target)?;
                Some((source.name.clone(), target.name.clone()))
            })
            .collect()
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<GraphNode, GraphEdge> {
        &self.inner
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
