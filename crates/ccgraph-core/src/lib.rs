//! Call graph model, symbol filtering, projections and DOT output

pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod model;
pub mod projection;
pub mod render;


pub use config::{CONFIG_FILE, Config, config_path};
pub use error::{ConfigError, RenderError};
pub use filter::{HeaderFilter, IgnoreSet};
pub use graph::{EdgePolicy, Graph};
pub use model::{
    CallSite, EdgeId, GraphEdge, GraphNode, IdentityPolicy, LOCATION_LINE, NodeId, NodeKey,
    NodeKind, Occurrence,
};
pub use projection::{Projection, ProjectionOptions, project};
pub use render::{RenderOptions, to_dot, write_dot};
