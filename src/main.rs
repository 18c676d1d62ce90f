//! ccgraph CLI entry point

use ccgraph_core::Projection;
use ccgraph_index::{Seed, WorkOrder};
use clap::{Parser, ValueEnum};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "ccgraph")]
#[command(version, about = "Call, file, and folder graphs for C/C++ code from a cscope database", long_about = None)]
struct Cli {
    /// Path to the cscope database; its directory is the working directory
    database: PathBuf,

    /// Which graph to write (repeatable)
    #[arg(short = 'g', long = "graph", value_enum, default_value = "all")]
    graphs: Vec<GraphKind>,

    /// Function to start from [default: main for the call graph alone]
    #[arg(short, long, conflicts_with = "all_functions")]
    root: Option<String>,

    /// Start from every function in the index
    #[arg(long)]
    all_functions: bool,

    /// Order in which discovered functions are expanded
    #[arg(long, value_enum, default_value = "dfs")]
    order: Order,

    /// cscope executable
    #[arg(long, default_value = ccgraph_index::cscope::DEFAULT_PROGRAM)]
    cscope: String,

    /// Directory for the .dot files (defaults to the working directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GraphKind {
    Call,
    File,
    Folder,
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Order {
    Dfs,
    Bfs,
}

impl Cli {
    fn projections(&self) -> BTreeSet<Projection> {
        self.graphs
            .iter()
            .flat_map(|kind| match kind {
                GraphKind::Call => vec![Projection::Call],
                GraphKind::File => vec![Projection::File],
                GraphKind::Folder => vec![Projection::Folder],
                GraphKind::All => Projection::ALL.to_vec(),
            })
            .collect()
    }

    fn seed(&self, projections: &BTreeSet<Projection>) -> Seed {
        if let Some(root) = &self.root {
            return Seed::Root(root.clone());
        }
        let call_graph_only = projections.len() == 1 && projections.contains(&Projection::Call);
        if self.all_functions || !call_graph_only {
            Seed::AllFunctions
        } else {
            Seed::Root("main".to_string())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("ccgraph={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("ccgraph v{}", env!("CARGO_PKG_VERSION"));

    let projections = cli.projections();
    let seed = cli.seed(&projections);
    let order = match cli.order {
        Order::Dfs => WorkOrder::DepthFirst,
        Order::Bfs => WorkOrder::BreadthFirst,
    };

    commands::generate(commands::GenerateArgs {
        database: cli.database,
        projections,
        seed,
        order,
        cscope: cli.cscope,
        output_dir: cli.output_dir,
    })
}
