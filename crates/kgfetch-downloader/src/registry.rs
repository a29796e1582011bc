//! Scheme → downloader lookup

use crate::github::GitHubExportDownloader;
use crate::protocol::ProtocolDownloader;
use kgfetch_core::KgfetchConfig;
use kgfetch_resolver::LinkScheme;
use std::collections::HashMap;

/// Outcome of looking a scheme up in the registry.
pub enum Dispatch<'a> {
    Ready(&'a dyn ProtocolDownloader),
    /// The scheme is recognised but nothing is wired to fetch it.
    NotImplemented(LinkScheme),
}

/// Downloaders keyed by the link scheme they handle.
#[derive(Default)]
pub struct DownloaderRegistry {
    downloaders: HashMap<LinkScheme, Box<dyn ProtocolDownloader>>,
}

impl DownloaderRegistry {
    /// An empty registry: every scheme dispatches to `NotImplemented`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in downloaders (GitHub export only).
    pub fn with_defaults(config: &KgfetchConfig) -> Self {
        let mut registry = Self::new();
        registry.register(
            LinkScheme::GitHub,
            Box::new(GitHubExportDownloader::from_config(&config.github)),
        );
        registry
    }

    /// Wire `downloader` to `scheme`, replacing any previous one.
    pub fn register(&mut self, scheme: LinkScheme, downloader: Box<dyn ProtocolDownloader>) {
        tracing::debug!("Registered {} downloader for {}", downloader.name(), scheme);
        self.downloaders.insert(scheme, downloader);
    }

    pub fn lookup(&self, scheme: LinkScheme) -> Dispatch<'_> {
        match self.downloaders.get(&scheme) {
            Some(downloader) => Dispatch::Ready(downloader.as_ref()),
            None => Dispatch::NotImplemented(scheme),
        }
    }
}
