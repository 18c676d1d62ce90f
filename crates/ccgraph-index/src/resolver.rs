//! Resolution of symbol names to function nodes

use crate::client::IndexClient;
use crate::error::IndexError;
use crate::SymbolIndex;
use ccgraph_core::{GraphNode, IdentityPolicy, Occurrence};

/// Resolve `symbol` to its function node(s) through a definition query.
///
/// An empty result means the symbol has no usable definition (unknown to the
/// index, or defined only in a filtered header) and should be skipped.
/// Under [`IdentityPolicy::Symbol`] at most one node is returned: when the
/// index reports several definition sites the first one in output order wins.
/// Under [`IdentityPolicy::Definition`] every site becomes its own node.
pub fn resolve_symbol<I: SymbolIndex>(
    client: &mut IndexClient<I>,
    symbol: &str,
    policy: IdentityPolicy,
) -> Result<Vec<GraphNode>, IndexError> {
    let definitions = client.definitions(symbol)?;
    Ok(nodes_for(symbol, &definitions, policy))
}

fn nodes_for(symbol: &str, definitions: &[Occurrence], policy: IdentityPolicy) -> Vec<GraphNode> {
    let Some(first) = definitions.first() else {
        tracing::debug!("No definition for {}, skipping", symbol);
        return Vec::new();
    };

    match policy {
        IdentityPolicy::Symbol => {
            if definitions.len() > 1 {
                tracing::warn!(
                    "{} has {} definitions, taking {}:{}",
                    symbol,
                    definitions.len(),
                    first.file.display(),
                    first.line
                );
            }
            vec![GraphNode::function(symbol, &first.file, first.line, policy)]
        }
        IdentityPolicy::Definition => definitions
            .iter()
            .map(|d| GraphNode::function(symbol, &d.file, d.line, policy))
            .collect(),
    }
}
