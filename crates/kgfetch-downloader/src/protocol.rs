//! Protocol downloader interface

use std::path::Path;

/// Errors from a protocol fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Performs the actual transfer of one source into a destination directory.
///
/// Calls are synchronous; timeouts and retries belong to the implementation
/// or its caller.
pub trait ProtocolDownloader: Send + Sync {
    /// Fetch `source` into `dest_dir`, which already exists.
    fn fetch(&self, source: &str, dest_dir: &Path) -> Result<(), FetchError>;

    /// Get downloader name
    fn name(&self) -> &str;
}
