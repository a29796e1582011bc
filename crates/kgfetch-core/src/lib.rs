//! kgfetch core: knowledge-graph model, query boundary, keynodes and snapshots

pub mod config;
pub mod error;
pub mod graph;
pub mod identifiers;
pub mod keynodes;
pub mod model;
pub mod query;
pub mod snapshot;


#[cfg(test)]
pub mod test_utils;

pub use config::KgfetchConfig;
pub use error::GraphError;
pub use graph::KnowledgeGraph;
pub use identifiers::IdentifierTable;
pub use keynodes::Keynodes;
pub use model::{
    EdgeAttribute, EdgeId, EdgeKind, GraphEdge, GraphNode, NodeId, NodeKind, Quintuple, Triple,
    TypeFilter,
};
pub use query::GraphQuery;
pub use snapshot::{Snapshot, load_snapshot, save_snapshot};
