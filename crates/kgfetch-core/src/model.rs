//! Core data structures for the knowledge graph

use serde::{Deserialize, Serialize};

/// Opaque identifier of a graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

/// Unique edge identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct EdgeId(pub u64);

/// What kind of element a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // ── Plain nodes ─────────────────────────────────────────
    Node,
    /// A set of elements (e.g. an alternative-address set).
    Tuple,
    Class,
    Relation,

    // ── Content carriers ────────────────────────────────────
    /// Carries opaque string content, typically a URL.
    Link,
}

impl NodeKind {
    pub fn is_link(self) -> bool {
        self == NodeKind::Link
    }
}

/// What kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Positive permanent membership: `class -> member`.
    Access,
    /// Directed binary-relation arc, usually annotated with a relation node.
    Common,
}

/// Element type filter used by pattern queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    Any,
    /// Any non-link element.
    Node,
    Tuple,
    Link,
}

impl TypeFilter {
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Node => !kind.is_link(),
            TypeFilter::Tuple => kind == NodeKind::Tuple,
            TypeFilter::Link => kind.is_link(),
        }
    }
}

/// Relation attached to an edge: `relation -arc-> edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeAttribute {
    pub relation: NodeId,
    pub arc: EdgeKind,
}

/// A single element of the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Human-readable system identifier, unique within a graph.
    pub idtf: Option<String>,
    /// Link content. Always `None` for non-link kinds.
    pub content: Option<String>,
}

impl GraphNode {
    pub fn new(kind: NodeKind) -> Self {
        GraphNode {
            id: NodeId::default(),
            kind,
            idtf: None,
            content: None,
        }
    }

    pub fn named(kind: NodeKind, idtf: impl Into<String>) -> Self {
        GraphNode {
            idtf: Some(idtf.into()),
            ..GraphNode::new(kind)
        }
    }

    pub fn link(content: impl Into<String>) -> Self {
        GraphNode {
            content: Some(content.into()),
            ..GraphNode::new(NodeKind::Link)
        }
    }
}

/// A directed edge in the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub attribute: Option<EdgeAttribute>,
}

/// Result of a three-element pattern query: `subject -edge-> object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple {
    pub subject: NodeId,
    pub edge: EdgeId,
    pub object: NodeId,
}

/// Result of a five-element pattern query:
/// `subject -edge-> object` with `relation -attribute-> edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quintuple {
    pub subject: NodeId,
    pub edge: EdgeId,
    pub object: NodeId,
    pub relation: NodeId,
}
