//! Knowledge graph wrapper using petgraph::StableDiGraph with custom NodeId/EdgeId

use crate::error::GraphError;
use crate::identifiers::IdentifierTable;
use crate::keynodes::KEYNODE_IDENTIFIERS;
use crate::model::*;
use crate::query::GraphQuery;
use crate::snapshot::ANONYMOUS_PREFIX;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

/// In-memory knowledge graph: a directed multigraph with stable node/edge indices.
pub struct KnowledgeGraph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    identifiers: IdentifierTable,
}

impl std::fmt::Debug for KnowledgeGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("identifiers", &self.identifiers.len())
            .finish()
    }
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        KnowledgeGraph {
            inner: StableDiGraph::new(),
            identifiers: IdentifierTable::new(),
        }
    }

    /// A graph with every keynode class and relation already registered.
    pub fn with_keynodes() -> Self {
        let mut graph = Self::new();
        for &(idtf, kind) in KEYNODE_IDENTIFIERS {
            graph.push(GraphNode::named(kind, idtf));
        }
        graph
    }

    /// Register the keynodes a loaded graph lacks. Returns how many were added.
    pub fn ensure_keynodes(&mut self) -> usize {
        let mut added = 0;
        for &(idtf, kind) in KEYNODE_IDENTIFIERS {
            if self.identifiers.lookup(idtf).is_none() {
                self.push(GraphNode::named(kind, idtf));
                added += 1;
            }
        }
        if added > 0 {
            tracing::debug!("Registered {} missing keynodes", added);
        }
        added
    }

    /// Add a node to graph. Returns assigned NodeId.
    ///
    /// Identifiers must be unique and must not use the snapshot key prefix
    /// reserved for anonymous nodes.
    pub fn add_node(&mut self, node: GraphNode) -> Result<NodeId, GraphError> {
        if let Some(idtf) = &node.idtf {
            if idtf.starts_with(ANONYMOUS_PREFIX) {
                return Err(GraphError::ReservedIdentifier(idtf.clone()));
            }
            if self.identifiers.lookup(idtf).is_some() {
                return Err(GraphError::DuplicateIdentifier(idtf.clone()));
            }
        }
        Ok(self.push(node))
    }

    /// Add an anonymous node of the given kind.
    pub fn add_anonymous(&mut self, kind: NodeKind) -> NodeId {
        self.push(GraphNode::new(kind))
    }

    /// Add an anonymous link carrying `content`.
    pub fn add_link(&mut self, content: impl Into<String>) -> NodeId {
        self.push(GraphNode::link(content))
    }

    fn push(&mut self, node: GraphNode) -> NodeId {
        let idtf = node.idtf.clone();
        let idx = self.inner.add_node(node);
        let id = NodeId(idx.index() as u64);
        self.inner[idx].id = id;
        if let Some(idtf) = idtf {
            self.identifiers.insert(idtf, id);
        }
        id
    }

    /// Add a plain edge. Returns assigned EdgeId.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
    ) -> Result<EdgeId, GraphError> {
        self.insert_edge(source, target, kind, None)
    }

    /// Add an edge annotated by `relation` through a membership arc.
    pub fn add_relation_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
        relation: NodeId,
    ) -> Result<EdgeId, GraphError> {
        self.require(relation)?;
        let attribute = EdgeAttribute {
            relation,
            arc: EdgeKind::Access,
        };
        self.insert_edge(source, target, kind, Some(attribute))
    }

    /// Add an edge with an explicit attribute.
    pub fn add_attributed_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
        attribute: Option<EdgeAttribute>,
    ) -> Result<EdgeId, GraphError> {
        if let Some(attribute) = attribute {
            self.require(attribute.relation)?;
        }
        self.insert_edge(source, target, kind, attribute)
    }

    fn insert_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
        attribute: Option<EdgeAttribute>,
    ) -> Result<EdgeId, GraphError> {
        let source_idx = self.require(source)?;
        let target_idx = self.require(target)?;
        let edge = GraphEdge {
            id: EdgeId::default(),
            source,
            target,
            kind,
            attribute,
        };
        let idx = self.inner.add_edge(source_idx, target_idx, edge);
        let id = EdgeId(idx.index() as u64);
        self.inner[idx].id = id;
        Ok(id)
    }

    fn require(&self, id: NodeId) -> Result<NodeIndex, GraphError> {
        let idx = NodeIndex::new(id.0 as usize);
        if self.inner.contains_node(idx) {
            Ok(idx)
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        let idx = NodeIndex::new(id.0 as usize);
        self.inner.node_weight(idx)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes.
    pub fn all_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges.
    pub fn all_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Outgoing edges of a node in insertion order.
    pub fn edges_from(&self, source: NodeId) -> Vec<&GraphEdge> {
        let idx = NodeIndex::new(source.0 as usize);
        if !self.inner.contains_node(idx) {
            return Vec::new();
        }
        let mut edges: Vec<&GraphEdge> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge_ref| self.inner.edge_weight(edge_ref.id()))
            .collect();
        // petgraph walks adjacency lists newest-first.
        edges.sort_by_key(|e| e.id);
        edges
    }

    fn kind_of(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }
}

impl GraphQuery for KnowledgeGraph {
    fn edge_exists(&self, from: NodeId, to: NodeId, kind: EdgeKind) -> bool {
        self.edges_from(from)
            .iter()
            .any(|e| e.target == to && e.kind == kind)
    }

    fn triples(
        &self,
        subject: NodeId,
        edge: EdgeKind,
        object: TypeFilter,
    ) -> Box<dyn Iterator<Item = Triple> + '_> {
        let matches: Vec<Triple> = self
            .edges_from(subject)
            .into_iter()
            .filter(|e| e.kind == edge)
            .filter(|e| self.kind_of(e.target).is_some_and(|k| object.matches(k)))
            .map(|e| Triple {
                subject,
                edge: e.id,
                object: e.target,
            })
            .collect();
        Box::new(matches.into_iter())
    }

    fn quintuples(
        &self,
        subject: NodeId,
        edge: EdgeKind,
        object: TypeFilter,
        attribute: EdgeKind,
        relation: NodeId,
    ) -> Box<dyn Iterator<Item = Quintuple> + '_> {
        let matches: Vec<Quintuple> = self
            .edges_from(subject)
            .into_iter()
            .filter(|e| e.kind == edge)
            .filter(|e| {
                e.attribute
                    .is_some_and(|a| a.relation == relation && a.arc == attribute)
            })
            .filter(|e| self.kind_of(e.target).is_some_and(|k| object.matches(k)))
            .map(|e| Quintuple {
                subject,
                edge: e.id,
                object: e.target,
                relation,
            })
            .collect();
        Box::new(matches.into_iter())
    }

    fn link_content(&self, link: NodeId) -> Result<String, GraphError> {
        let node = self.node(link).ok_or(GraphError::UnknownNode(link))?;
        if !node.kind.is_link() {
            return Err(GraphError::NotALink(link));
        }
        node.content
            .clone()
            .ok_or(GraphError::ContentUnavailable(link))
    }

    fn system_identifier(&self, node: NodeId) -> Option<String> {
        self.identifiers.identifier_of(node)
    }

    fn find_by_identifier(&self, idtf: &str) -> Option<NodeId> {
        self.identifiers.lookup(idtf)
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}
