//! JSON snapshots of a knowledge graph
//!
//! Endpoints are referenced by identifier. Nodes without an identifier are
//! written under a generated `_node_<index>` key and read back as anonymous.

use crate::error::GraphError;
use crate::graph::KnowledgeGraph;
use crate::model::{EdgeAttribute, EdgeKind, GraphNode, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Key prefix for nodes that have no identifier of their own.
pub const ANONYMOUS_PREFIX: &str = "_node_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub saved_at: Option<String>,
    pub nodes: Vec<SnapshotNode>,
    #[serde(default)]
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub idtf: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_arc: Option<EdgeKind>,
}

impl Snapshot {
    /// Capture the current state of `graph`.
    pub fn capture(graph: &KnowledgeGraph) -> Self {
        let key_of = |id: NodeId| -> String {
            graph
                .node(id)
                .and_then(|n| n.idtf.clone())
                .unwrap_or_else(|| format!("{}{}", ANONYMOUS_PREFIX, id.0))
        };

        let nodes = graph
            .all_nodes()
            .map(|n| SnapshotNode {
                idtf: key_of(n.id),
                kind: n.kind,
                content: n.content.clone(),
            })
            .collect();

        let edges = graph
            .all_edges()
            .map(|e| SnapshotEdge {
                source: key_of(e.source),
                target: key_of(e.target),
                kind: e.kind,
                relation: e.attribute.map(|a| key_of(a.relation)),
                relation_arc: e.attribute.map(|a| a.arc),
            })
            .collect();

        Snapshot {
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            nodes,
            edges,
        }
    }

    /// Rebuild a graph from this snapshot.
    pub fn restore(&self) -> Result<KnowledgeGraph, GraphError> {
        let mut graph = KnowledgeGraph::new();
        let mut keys: HashMap<&str, NodeId> = HashMap::new();

        for node in &self.nodes {
            if keys.contains_key(node.idtf.as_str()) {
                return Err(GraphError::DuplicateIdentifier(node.idtf.clone()));
            }
            let mut element = if node.idtf.starts_with(ANONYMOUS_PREFIX) {
                GraphNode::new(node.kind)
            } else {
                GraphNode::named(node.kind, node.idtf.clone())
            };
            if node.kind.is_link() {
                element.content = node.content.clone();
            }
            let id = graph.add_node(element)?;
            keys.insert(node.idtf.as_str(), id);
        }

        let lookup = |key: &str| {
            keys.get(key)
                .copied()
                .ok_or_else(|| GraphError::UnknownIdentifier(key.to_string()))
        };

        for edge in &self.edges {
            let attribute = match &edge.relation {
                Some(relation) => Some(EdgeAttribute {
                    relation: lookup(relation)?,
                    arc: edge.relation_arc.unwrap_or(EdgeKind::Access),
                }),
                None => None,
            };
            graph.add_attributed_edge(
                lookup(&edge.source)?,
                lookup(&edge.target)?,
                edge.kind,
                attribute,
            )?;
        }

        Ok(graph)
    }
}

/// Serialize `graph` to `path` as pretty JSON, creating parent directories.
pub fn save_snapshot(graph: &KnowledgeGraph, path: &Path) -> Result<(), GraphError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| GraphError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json_str = serde_json::to_string_pretty(&Snapshot::capture(graph))?;
    std::fs::write(path, json_str).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Graph snapshot saved: {}", path.display());
    Ok(())
}

/// Load a graph from a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<KnowledgeGraph, GraphError> {
    let json_str = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: Snapshot = serde_json::from_str(&json_str)?;
    let graph = snapshot.restore()?;

    tracing::debug!(
        "Graph snapshot loaded from {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
