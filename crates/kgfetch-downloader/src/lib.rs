//! Component downloading over pluggable protocol downloaders
//!
//! The orchestrator walks the graph through a [`kgfetch_resolver::Resolver`]
//! and hands each resolved source to the downloader registered for its
//! link scheme.

pub mod github;
pub mod orchestrator;
pub mod protocol;
pub mod registry;
pub mod specs;


pub use github::GitHubExportDownloader;
pub use orchestrator::{
    DownloadError, DownloadOrchestrator, DownloadReport, LinkError, LinkOutcome, SourceLayout,
};
pub use protocol::{FetchError, ProtocolDownloader};
pub use registry::{Dispatch, DownloaderRegistry};
pub use specs::{build_globset, specification_files};
