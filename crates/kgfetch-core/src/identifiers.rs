//! Identifier table for system-identifier lookup

use crate::model::NodeId;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Maps system identifiers to NodeIds and back. Thread-safe for concurrent access.
pub struct IdentifierTable {
    by_idtf: DashMap<String, NodeId>,
    by_node: DashMap<NodeId, String>,
}

impl IdentifierTable {
    pub fn new() -> Self {
        IdentifierTable {
            by_idtf: DashMap::new(),
            by_node: DashMap::new(),
        }
    }

    /// Bind an identifier. Returns false if it is already taken.
    pub fn insert(&self, idtf: String, node_id: NodeId) -> bool {
        match self.by_idtf.entry(idtf.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node_id);
                self.by_node.insert(node_id, idtf);
                true
            }
        }
    }

    /// Look a node up by identifier.
    pub fn lookup(&self, idtf: &str) -> Option<NodeId> {
        self.by_idtf.get(idtf).map(|r| *r.value())
    }

    /// Identifier bound to a node, if any.
    pub fn identifier_of(&self, node_id: NodeId) -> Option<String> {
        self.by_node.get(&node_id).map(|r| r.value().clone())
    }

    pub(crate) fn len(&self) -> usize {
        self.by_idtf.len()
    }
}

impl Default for IdentifierTable {
    fn default() -> Self {
        Self::new()
    }
}
