//! Dependency traversal primitive for installation drivers

use crate::Resolver;
use kgfetch_core::NodeId;
use std::collections::HashSet;

impl<'g> Resolver<'g> {
    /// Every transitive dependency of `component`, each once, dependencies
    /// before their dependents. The component itself is not included.
    pub fn dependency_closure(&self, component: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(component);

        // (node, children already pushed)
        let mut to_visit: Vec<(NodeId, bool)> = self
            .component_dependencies(component)
            .into_iter()
            .rev()
            .map(|dep| (dep, false))
            .collect();

        while let Some((current, expanded)) = to_visit.pop() {
            if expanded {
                order.push(current);
                continue;
            }
            if !visited.insert(current) {
                continue;
            }
            to_visit.push((current, true));
            for dep in self.component_dependencies(current).into_iter().rev() {
                if !visited.contains(&dep) {
                    to_visit.push((dep, false));
                }
            }
        }

        order
    }
}
