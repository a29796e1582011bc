//! Errors raised by the graph store and its persistence layer

use crate::model::NodeId;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("no node with identifier `{0}`")]
    UnknownIdentifier(String),
    #[error("identifier `{0}` is already bound")]
    DuplicateIdentifier(String),
    #[error("identifier `{0}` uses the prefix reserved for anonymous nodes")]
    ReservedIdentifier(String),
    #[error("node {0:?} is not a link")]
    NotALink(NodeId),
    #[error("link {0:?} has no content")]
    ContentUnavailable(NodeId),
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed graph snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
