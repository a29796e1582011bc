//! Graph resolution for downloadable components
//!
//! Classifies nodes and links, locates component addresses with
//! primary/fallback selection, and answers the read-only installation
//! queries an external installer drives.

pub mod address;
pub mod classify;
pub mod install;
pub mod traverse;


use kgfetch_core::{GraphError, GraphQuery, Keynodes};

pub use classify::{Kind, LinkScheme};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// An expected relation or link is absent.
    #[error("not found: {0}")]
    NotFound(String),
    /// A relation exists but its target is structurally invalid.
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Read-only view over a graph and its bound keynodes.
#[derive(Clone, Copy)]
pub struct Resolver<'g> {
    graph: &'g dyn GraphQuery,
    keynodes: &'g Keynodes,
}

impl<'g> Resolver<'g> {
    pub fn new(graph: &'g dyn GraphQuery, keynodes: &'g Keynodes) -> Self {
        Self { graph, keynodes }
    }

    pub fn graph(&self) -> &'g dyn GraphQuery {
        self.graph
    }

    pub fn keynodes(&self) -> &'g Keynodes {
        self.keynodes
    }
}
