//! Installation metadata queries used by an external installer

use crate::{ResolveError, Resolver};
use kgfetch_core::{EdgeKind, GraphError, NodeId, TypeFilter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

impl<'g> Resolver<'g> {
    /// True iff `component` is a member of the reusable-component class.
    pub fn is_reusable(&self, component: NodeId) -> bool {
        let reusable = self.graph.edge_exists(
            self.keynodes.concept_reusable_component,
            component,
            EdgeKind::Access,
        );
        if !reusable {
            warn!("Component {} is not a reusable component", self.describe(component));
        }
        reusable
    }

    /// Content of every installation-script link, in graph order.
    ///
    /// Empty scripts, including links with no content, are dropped. Duplicates
    /// are kept: knowledge bases that describe one repository through two
    /// specifications repeat every link.
    pub fn install_scripts(&self, component: NodeId) -> Result<Vec<String>, ResolveError> {
        let mut scripts = Vec::new();
        for script in self.graph.quintuples(
            component,
            EdgeKind::Common,
            TypeFilter::Link,
            EdgeKind::Access,
            self.keynodes.nrel_installation_script,
        ) {
            let content = self.content_or_empty(script.object)?;
            debug!("Install script found for {}: {}", self.describe(component), content);
            if !content.is_empty() {
                scripts.push(content);
            }
        }
        Ok(scripts)
    }

    /// True iff the component declares an installation method.
    pub fn is_installation_method_valid(&self, component: NodeId) -> bool {
        let valid = self.component_installation_method(component).is_some();
        if !valid {
            warn!(
                "Installation method of component {} isn't valid",
                self.describe(component)
            );
        }
        valid
    }

    /// Content of the component address link. Empty when no address is set
    /// or the address link carries no content.
    pub fn component_address_string(&self, component: NodeId) -> Result<String, ResolveError> {
        match self.component_address(component) {
            Some(link) => self.content_or_empty(link),
            None => Ok(String::new()),
        }
    }

    fn content_or_empty(&self, link: NodeId) -> Result<String, ResolveError> {
        match self.graph.link_content(link) {
            Err(GraphError::ContentUnavailable(_)) => Ok(String::new()),
            content => Ok(content?),
        }
    }

    /// `specs_root` joined with the last path segment of the component address.
    ///
    /// Returns `None` when the component has no address.
    pub fn component_dir_name(
        &self,
        component: NodeId,
        specs_root: &Path,
    ) -> Result<Option<PathBuf>, ResolveError> {
        let address = self.component_address_string(component)?;
        if address.is_empty() {
            return Ok(None);
        }
        let name = last_segment(&address);
        Ok(Some(specs_root.join(name)))
    }
}

/// Everything after the last `/`, or the whole string when there is none.
pub fn last_segment(address: &str) -> &str {
    match address.rfind('/') {
        Some(idx) => &address[idx + 1..],
        None => address,
    }
}
