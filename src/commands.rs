//! CLI command implementations

use anyhow::Context;
use ccgraph_core::{Config, Projection, ProjectionOptions, RenderOptions, project, write_dot};
use ccgraph_index::{CscopeIndex, IndexClient, Seed, TraversalOptions, WorkOrder, traverse};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub struct GenerateArgs {
    pub database: PathBuf,
    pub projections: BTreeSet<Projection>,
    pub seed: Seed,
    pub order: WorkOrder,
    pub cscope: String,
    pub output_dir: Option<PathBuf>,
}

/// Build the call relation once and write every requested graph from it.
pub fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let index = CscopeIndex::open(&args.database, args.cscope.as_str())
        .with_context(|| format!("Cannot use cscope database {}", args.database.display()))?;
    let working_dir = index.working_dir().to_path_buf();
    tracing::info!("Working directory: {}", working_dir.display());

    let config = Config::load_or_init(&working_dir).context("Failed to load ccgraph config")?;
    let filter = config.ignore_set()?;
    tracing::debug!(
        "{} ignore patterns, header filtering {}",
        filter.len(),
        if config.ignore_header { "on" } else { "off" }
    );

    let mut client = IndexClient::new(index, config.header_filter());
    if config.cache_queries {
        client = client.with_cache();
    }

    let options = TraversalOptions {
        order: args.order,
        identity: config.node_identity,
    };
    let relation = traverse(&mut client, &filter, &args.seed, options)
        .with_context(|| format!("Call graph traversal failed ({} queries issued)", client.queries_issued()))?;

    tracing::info!(
        "Call relation: {} functions, {} call edges ({} unresolved callees, {} ignored)",
        relation.graph.node_count(),
        relation.graph.edge_count(),
        relation.stats.unresolved,
        relation.stats.ignored
    );

    let output_dir = args.output_dir.unwrap_or(working_dir);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Cannot create output directory {}", output_dir.display()))?;

    let projection_options = ProjectionOptions {
        keep_self_loops: config.self_loops,
    };
    let render_options = RenderOptions {
        show_folder: config.show_folder,
    };
    for projection in &args.projections {
        let graph = project(&relation.graph, *projection, projection_options);
        let path = projection.output_path(&output_dir);
        write_dot(&graph, &path, &render_options)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if let Some(stats) = client.cache_stats() {
        tracing::debug!(
            "Query cache: {} entries, {} hits, {} misses",
            stats.entries,
            stats.hits,
            stats.misses
        );
    }
    tracing::info!("Done after {} cscope queries", client.queries_issued());

    Ok(())
}
