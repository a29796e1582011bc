//! Address lookup for components, specifications and repositories
//!
//! Specifications may be hosted on several mirrors: an alternative-address set
//! hangs off the specification, one member is selected (the `rrel_1` member if
//! present, otherwise any member), and every link of that member is returned.
//! Repositories are single-sourced and resolve to exactly one link.

use crate::{ResolveError, Resolver};
use kgfetch_core::{EdgeKind, NodeId, TypeFilter};
use std::collections::BTreeSet;

impl<'g> Resolver<'g> {
    /// Link attached through `nrel_component_address`, if any.
    pub fn component_address(&self, component: NodeId) -> Option<NodeId> {
        self.graph
            .quintuples(
                component,
                EdgeKind::Common,
                TypeFilter::Link,
                EdgeKind::Access,
                self.keynodes.nrel_component_address,
            )
            .next()
            .map(|q| q.object)
    }

    /// Union of the members of every dependency set the component declares.
    pub fn component_dependencies(&self, component: NodeId) -> BTreeSet<NodeId> {
        let mut dependencies = BTreeSet::new();
        for relation in self.graph.quintuples(
            component,
            EdgeKind::Common,
            TypeFilter::Node,
            EdgeKind::Access,
            self.keynodes.nrel_component_dependencies,
        ) {
            dependencies.extend(
                self.graph
                    .triples(relation.object, EdgeKind::Access, TypeFilter::Node)
                    .map(|t| t.object),
            );
        }
        dependencies
    }

    /// Node attached through `nrel_installation_method`, if any.
    pub fn component_installation_method(&self, component: NodeId) -> Option<NodeId> {
        self.graph
            .quintuples(
                component,
                EdgeKind::Common,
                TypeFilter::Node,
                EdgeKind::Access,
                self.keynodes.nrel_installation_method,
            )
            .next()
            .map(|q| q.object)
    }

    /// Links of the selected member of a specification's alternative-address set.
    pub fn specification_address(&self, specification: NodeId) -> Result<Vec<NodeId>, ResolveError> {
        let addresses = self
            .graph
            .quintuples(
                specification,
                EdgeKind::Common,
                TypeFilter::Tuple,
                EdgeKind::Access,
                self.keynodes.nrel_alternative_addresses,
            )
            .next()
            .map(|q| q.object)
            .ok_or_else(|| {
                ResolveError::NotFound(format!(
                    "no alternative addresses set for {}",
                    self.describe(specification)
                ))
            })?;

        if self.graph.is_empty_set(addresses) {
            return Err(ResolveError::InvalidState(format!(
                "alternative addresses set of {} is empty",
                self.describe(specification)
            )));
        }

        let selected = match self.primary_member(addresses) {
            Some(primary) => primary,
            None => self.any_member(addresses).ok_or_else(|| {
                ResolveError::InvalidState(format!(
                    "alternative addresses set of {} is empty",
                    self.describe(specification)
                ))
            })?,
        };

        let links: Vec<NodeId> = self
            .graph
            .triples(selected, EdgeKind::Access, TypeFilter::Link)
            .map(|t| t.object)
            .collect();
        if links.is_empty() {
            return Err(ResolveError::InvalidState(format!(
                "address {} of {} has no links",
                self.describe(selected),
                self.describe(specification)
            )));
        }

        for &link in &links {
            self.graph.link_content(link)?;
        }
        Ok(links)
    }

    /// The single link a repository is hosted at.
    pub fn repository_address(&self, repository: NodeId) -> Result<NodeId, ResolveError> {
        let address = self
            .graph
            .quintuples(
                repository,
                EdgeKind::Common,
                TypeFilter::Node,
                EdgeKind::Access,
                self.keynodes.nrel_repository_address,
            )
            .next()
            .map(|q| q.object)
            .ok_or_else(|| {
                ResolveError::NotFound(format!(
                    "no address found for repository {}",
                    self.describe(repository)
                ))
            })?;

        let link = self
            .graph
            .triples(address, EdgeKind::Access, TypeFilter::Link)
            .next()
            .map(|t| t.object)
            .ok_or_else(|| {
                ResolveError::NotFound(format!(
                    "no links for address of repository {}",
                    self.describe(repository)
                ))
            })?;

        self.graph.link_content(link)?;
        Ok(link)
    }

    fn primary_member(&self, set: NodeId) -> Option<NodeId> {
        self.graph
            .quintuples(
                set,
                EdgeKind::Access,
                TypeFilter::Any,
                EdgeKind::Access,
                self.keynodes.rrel_1,
            )
            .next()
            .map(|q| q.object)
    }

    fn any_member(&self, set: NodeId) -> Option<NodeId> {
        self.graph
            .triples(set, EdgeKind::Access, TypeFilter::Any)
            .next()
            .map(|t| t.object)
    }

    /// Identifier of `node` for log and error messages, `#<id>` when it has none.
    pub fn describe(&self, node: NodeId) -> String {
        self.graph
            .system_identifier(node)
            .unwrap_or_else(|| format!("#{}", node.0))
    }
}
