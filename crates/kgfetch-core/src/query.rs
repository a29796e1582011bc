//! Read-only query boundary over a knowledge graph store
//!
//! Resolvers only ever talk to a store through [`GraphQuery`], so any backend
//! that can answer triple and quintuple patterns can drive a download.

use crate::error::GraphError;
use crate::model::{EdgeKind, NodeId, Quintuple, Triple, TypeFilter};

pub trait GraphQuery {
    /// Check whether `from -kind-> to` exists.
    fn edge_exists(&self, from: NodeId, to: NodeId, kind: EdgeKind) -> bool;

    /// Match `subject -edge-> object` where the object passes `object`.
    fn triples(
        &self,
        subject: NodeId,
        edge: EdgeKind,
        object: TypeFilter,
    ) -> Box<dyn Iterator<Item = Triple> + '_>;

    /// Match `subject -edge-> object` where `relation -attribute-> edge`.
    fn quintuples(
        &self,
        subject: NodeId,
        edge: EdgeKind,
        object: TypeFilter,
        attribute: EdgeKind,
        relation: NodeId,
    ) -> Box<dyn Iterator<Item = Quintuple> + '_>;

    /// Content of a link node.
    fn link_content(&self, link: NodeId) -> Result<String, GraphError>;

    /// Human-readable identifier of a node, if it has one.
    fn system_identifier(&self, node: NodeId) -> Option<String>;

    /// Look a node up by its identifier.
    fn find_by_identifier(&self, idtf: &str) -> Option<NodeId>;

    /// True when `set` has no outgoing membership arcs.
    fn is_empty_set(&self, set: NodeId) -> bool {
        self.triples(set, EdgeKind::Access, TypeFilter::Any)
            .next()
            .is_none()
    }
}
