//! Fixed class and relation nodes every resolver query is anchored on
//!
//! Bound once from a graph at startup and passed by reference afterwards.

use crate::error::GraphError;
use crate::model::{NodeId, NodeKind};
use crate::query::GraphQuery;

pub const CONCEPT_REPOSITORY: &str = "concept_repository";
pub const CONCEPT_REUSABLE_COMPONENT_SPECIFICATION: &str =
    "concept_reusable_component_specification";
pub const CONCEPT_GITHUB_URL: &str = "concept_github_url";
pub const CONCEPT_GOOGLE_DRIVE_URL: &str = "concept_google_drive_url";
pub const CONCEPT_REUSABLE_COMPONENT: &str = "concept_reusable_component";
pub const NREL_COMPONENT_ADDRESS: &str = "nrel_component_address";
pub const NREL_COMPONENT_DEPENDENCIES: &str = "nrel_component_dependencies";
pub const NREL_INSTALLATION_METHOD: &str = "nrel_installation_method";
pub const NREL_INSTALLATION_SCRIPT: &str = "nrel_installation_script";
pub const NREL_ALTERNATIVE_ADDRESSES: &str = "nrel_alternative_addresses";
pub const NREL_REPOSITORY_ADDRESS: &str = "nrel_repository_address";
/// Role relation marking the first (primary) member of a set.
pub const RREL_1: &str = "rrel_1";

/// Every keynode identifier with the element kind it is created as.
pub const KEYNODE_IDENTIFIERS: &[(&str, NodeKind)] = &[
    (CONCEPT_REPOSITORY, NodeKind::Class),
    (CONCEPT_REUSABLE_COMPONENT_SPECIFICATION, NodeKind::Class),
    (CONCEPT_GITHUB_URL, NodeKind::Class),
    (CONCEPT_GOOGLE_DRIVE_URL, NodeKind::Class),
    (CONCEPT_REUSABLE_COMPONENT, NodeKind::Class),
    (NREL_COMPONENT_ADDRESS, NodeKind::Relation),
    (NREL_COMPONENT_DEPENDENCIES, NodeKind::Relation),
    (NREL_INSTALLATION_METHOD, NodeKind::Relation),
    (NREL_INSTALLATION_SCRIPT, NodeKind::Relation),
    (NREL_ALTERNATIVE_ADDRESSES, NodeKind::Relation),
    (NREL_REPOSITORY_ADDRESS, NodeKind::Relation),
    (RREL_1, NodeKind::Relation),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keynodes {
    // ── Downloadable classes ────────────────────────────────
    pub concept_repository: NodeId,
    pub concept_reusable_component_specification: NodeId,

    // ── Link schemes ────────────────────────────────────────
    pub concept_github_url: NodeId,
    pub concept_google_drive_url: NodeId,

    // ── Installation ────────────────────────────────────────
    pub concept_reusable_component: NodeId,
    pub nrel_component_address: NodeId,
    pub nrel_component_dependencies: NodeId,
    pub nrel_installation_method: NodeId,
    pub nrel_installation_script: NodeId,

    // ── Addressing ──────────────────────────────────────────
    pub nrel_alternative_addresses: NodeId,
    pub nrel_repository_address: NodeId,
    pub rrel_1: NodeId,
}

impl Keynodes {
    /// Bind every keynode from `graph`. Fails on the first missing identifier.
    pub fn resolve(graph: &dyn GraphQuery) -> Result<Self, GraphError> {
        let get = |idtf: &str| {
            graph
                .find_by_identifier(idtf)
                .ok_or_else(|| GraphError::UnknownIdentifier(idtf.to_string()))
        };

        let keynodes = Keynodes {
            concept_repository: get(CONCEPT_REPOSITORY)?,
            concept_reusable_component_specification: get(CONCEPT_REUSABLE_COMPONENT_SPECIFICATION)?,
            concept_github_url: get(CONCEPT_GITHUB_URL)?,
            concept_google_drive_url: get(CONCEPT_GOOGLE_DRIVE_URL)?,
            concept_reusable_component: get(CONCEPT_REUSABLE_COMPONENT)?,
            nrel_component_address: get(NREL_COMPONENT_ADDRESS)?,
            nrel_component_dependencies: get(NREL_COMPONENT_DEPENDENCIES)?,
            nrel_installation_method: get(NREL_INSTALLATION_METHOD)?,
            nrel_installation_script: get(NREL_INSTALLATION_SCRIPT)?,
            nrel_alternative_addresses: get(NREL_ALTERNATIVE_ADDRESSES)?,
            nrel_repository_address: get(NREL_REPOSITORY_ADDRESS)?,
            rrel_1: get(RREL_1)?,
        };
        tracing::debug!("Bound {} keynodes", KEYNODE_IDENTIFIERS.len());
        Ok(keynodes)
    }
}
