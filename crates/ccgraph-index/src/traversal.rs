//! Worklist traversal that discovers the call relation from a seed
//!
//! The traversal owns all of its state (worklist, visited set, accumulated
//! graph) in a [`Traversal`] context. Each node is expanded at most once, so
//! the number of expansions is bounded by the number of distinct reachable
//! nodes.

use crate::client::IndexClient;
use crate::error::IndexError;
use crate::resolver::resolve_symbol;
use crate::SymbolIndex;
use ccgraph_core::{CallSite, Graph, GraphNode, IdentityPolicy, IgnoreSet, NodeKey};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

/// Where the traversal starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// A single root function. Failing to resolve it is an error.
    Root(String),
    /// Every function the index knows to be called. Callers are explored as
    /// well so entry points that nobody calls are still found.
    AllFunctions,
}

/// Order in which pending nodes are expanded. Affects output ordering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkOrder {
    #[default]
    DepthFirst,
    BreadthFirst,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TraversalOptions {
    pub order: WorkOrder,
    pub identity: IdentityPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes whose callees were queried.
    pub expansions: usize,
    /// Call sites skipped because the callee had no usable definition.
    pub unresolved: usize,
    /// Pending nodes dropped because they matched an ignore pattern.
    pub ignored: usize,
}

/// The discovered call relation: function nodes plus one edge per call site.
#[derive(Debug)]
pub struct CallRelation {
    pub graph: Graph,
    pub stats: TraversalStats,
}

/// Discover the call relation reachable from `seed`.
pub fn traverse<I: SymbolIndex>(
    client: &mut IndexClient<I>,
    filter: &IgnoreSet,
    seed: &Seed,
    options: TraversalOptions,
) -> Result<CallRelation, IndexError> {
    let mut traversal = Traversal::new(client, filter, options, matches!(seed, Seed::AllFunctions));
    traversal.seed(seed)?;
    traversal.run()?;
    Ok(traversal.finish())
}

struct Traversal<'a, I> {
    client: &'a mut IndexClient<I>,
    filter: &'a IgnoreSet,
    options: TraversalOptions,
    discover_callers: bool,
    worklist: VecDeque<GraphNode>,
    visited: HashSet<NodeKey>,
    resolved: HashMap<String, Vec<GraphNode>>,
    graph: Graph,
    stats: TraversalStats,
}

impl<'a, I: SymbolIndex> Traversal<'a, I> {
    fn new(
        client: &'a mut IndexClient<I>,
        filter: &'a IgnoreSet,
        options: TraversalOptions,
        discover_callers: bool,
    ) -> Self {
        Traversal {
            client,
            filter,
            options,
            discover_callers,
            worklist: VecDeque::new(),
            visited: HashSet::new(),
            resolved: HashMap::new(),
            graph: Graph::multigraph(),
            stats: TraversalStats::default(),
        }
    }

    fn seed(&mut self, seed: &Seed) -> Result<(), IndexError> {
        match seed {
            Seed::Root(symbol) => {
                let nodes = self.resolve(symbol)?;
                if nodes.is_empty() {
                    return Err(IndexError::UnresolvableRoot(symbol.clone()));
                }
                self.worklist.extend(nodes);
            }
            Seed::AllFunctions => {
                let symbols = self.client.all_functions()?;
                tracing::info!("Seeding traversal with {} functions", symbols.len());
                for symbol in symbols {
                    if self.filter.is_ignored(&symbol) {
                        continue;
                    }
                    let nodes = self.resolve(&symbol)?;
                    self.worklist.extend(nodes);
                }
            }
        }
        Ok(())
    }

    fn run(&mut self) -> Result<(), IndexError> {
        while let Some(node) = self.pop() {
            if self.visited.contains(&node.key) {
                continue;
            }
            if self.filter.is_ignored(&node.name) {
                self.stats.ignored += 1;
                continue;
            }
            self.visited.insert(node.key.clone());
            self.expand(node)?;
        }
        Ok(())
    }

    fn pop(&mut self) -> Option<GraphNode> {
        match self.options.order {
            WorkOrder::DepthFirst => self.worklist.pop_back(),
            WorkOrder::BreadthFirst => self.worklist.pop_front(),
        }
    }

    fn expand(&mut self, node: GraphNode) -> Result<(), IndexError> {
        self.stats.expansions += 1;
        tracing::debug!("Expanding {} ({}:{})", node.name, node.file_path.display(), node.line);
        let caller_id = self.graph.add_node(node.clone());

        let callees = self.client.callees(&node.name)?;
        for site in callees.occurrences {
            // Same-named functions in other files have their own nodes
            if self.options.identity == IdentityPolicy::Definition && site.file != node.file_path {
                continue;
            }
            if self.filter.is_ignored(&site.symbol) {
                continue;
            }

            let mut targets = self.resolve(&site.symbol)?;
            if self.options.identity == IdentityPolicy::Definition {
                targets = local_first(targets, &site.file);
            }
            if targets.is_empty() {
                self.stats.unresolved += 1;
                continue;
            }
            for callee in targets {
                let callee_id = self.graph.add_node(callee.clone());
                self.graph.add_edge(
                    caller_id,
                    callee_id,
                    None,
                    Some(CallSite {
                        file: site.file.clone(),
                        line: site.line,
                    }),
                );
                if !self.visited.contains(&callee.key) {
                    self.worklist.push_back(callee);
                }
            }
        }

        if self.discover_callers {
            let callers = self.client.callers(&node.name)?;
            for symbol in &callers.symbols {
                if self.filter.is_ignored(symbol) {
                    continue;
                }
                for caller in self.resolve(symbol)? {
                    if !self.visited.contains(&caller.key) {
                        self.worklist.push_back(caller);
                    }
                }
            }
        }

        Ok(())
    }

    fn resolve(&mut self, symbol: &str) -> Result<Vec<GraphNode>, IndexError> {
        if let Some(nodes) = self.resolved.get(symbol) {
            return Ok(nodes.clone());
        }
        let nodes = resolve_symbol(self.client, symbol, self.options.identity)?;
        self.resolved.insert(symbol.to_string(), nodes.clone());
        Ok(nodes)
    }

    fn finish(self) -> CallRelation {
        tracing::info!(
            "Traversal done: {} expansions, {} nodes, {} call sites, {} unresolved",
            self.stats.expansions,
            self.graph.node_count(),
            self.graph.edge_count(),
            self.stats.unresolved
        );
        CallRelation {
            graph: self.graph,
            stats: self.stats,
        }
    }
}

/// Definitions in the calling file shadow same-named ones elsewhere, the way
/// a static function does. Without a local one every site is a candidate.
fn local_first(candidates: Vec<GraphNode>, call_file: &Path) -> Vec<GraphNode> {
    if candidates.iter().any(|c| c.file_path.as_path() == call_file) {
        candidates
            .into_iter()
            .filter(|c| c.file_path.as_path() == call_file)
            .collect()
    } else {
        candidates
    }
}
