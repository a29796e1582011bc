//! Fixed-set classification of nodes and links

use crate::Resolver;
use kgfetch_core::{EdgeKind, NodeId};

/// Downloadable kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Repository,
    ReusableComponentSpecification,
    Unclassified,
}

/// URL scheme a link is declared to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScheme {
    GitHub,
    GoogleDrive,
    Unclassified,
}

impl std::fmt::Display for LinkScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LinkScheme::GitHub => "github",
            LinkScheme::GoogleDrive => "google-drive",
            LinkScheme::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

impl<'g> Resolver<'g> {
    /// Classify `node` by checking class membership in priority order.
    pub fn classify_downloadable(&self, node: NodeId) -> Kind {
        let candidates = [
            (self.keynodes.concept_repository, Kind::Repository),
            (
                self.keynodes.concept_reusable_component_specification,
                Kind::ReusableComponentSpecification,
            ),
        ];
        self.first_class(node, &candidates).unwrap_or(Kind::Unclassified)
    }

    /// Classify the URL scheme carried by `link`.
    pub fn classify_link(&self, link: NodeId) -> LinkScheme {
        let candidates = [
            (self.keynodes.concept_github_url, LinkScheme::GitHub),
            (self.keynodes.concept_google_drive_url, LinkScheme::GoogleDrive),
        ];
        self.first_class(link, &candidates)
            .unwrap_or(LinkScheme::Unclassified)
    }

    fn first_class<T: Copy>(&self, node: NodeId, candidates: &[(NodeId, T)]) -> Option<T> {
        candidates
            .iter()
            .find(|(class, _)| self.graph.edge_exists(*class, node, EdgeKind::Access))
            .map(|&(_, result)| result)
    }
}
