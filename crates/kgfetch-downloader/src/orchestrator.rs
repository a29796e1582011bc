//! Download orchestration: classify → resolve addresses → classify links → fetch
//!
//! Failures before any link is processed abort the node's download. Once
//! links are known, each one is handled independently and its outcome is
//! recorded in the [`DownloadReport`]; one failing mirror never stops the next.

use crate::protocol::FetchError;
use crate::registry::{Dispatch, DownloaderRegistry};
use kgfetch_core::config::KgfetchConfig;
use kgfetch_core::{GraphError, NodeId};
use kgfetch_resolver::{Kind, LinkScheme, ResolveError, Resolver};
use std::path::{Component, Path, PathBuf};
use tracing::{error, info, warn};

/// Errors that abort a node's download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("{0} is neither a repository nor a reusable component specification")]
    Classification(String),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("can't create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single link could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("can't read link content: {0}")]
    Content(#[from] GraphError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// What happened to one candidate link.
#[derive(Debug)]
pub enum LinkOutcome {
    Fetched { link: NodeId, source: String },
    /// Recognised scheme with no downloader wired to it.
    Skipped { link: NodeId, scheme: LinkScheme },
    /// The link is not a member of any known scheme class.
    Unclassified { link: NodeId },
    Failed { link: NodeId, error: LinkError },
}

/// Result of a download that got past resolution.
#[derive(Debug)]
pub struct DownloadReport {
    pub node: NodeId,
    pub kind: Kind,
    pub destination: PathBuf,
    pub outcomes: Vec<LinkOutcome>,
}

impl DownloadReport {
    pub fn fetched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LinkOutcome::Fetched { .. }))
            .count()
    }

    /// True when no link failed or was unclassified.
    pub fn is_clean(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o, LinkOutcome::Fetched { .. } | LinkOutcome::Skipped { .. }))
    }
}

/// How source locators are composed from link content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// Path segment that selects an exportable tree on GitHub.
    pub export_path: String,
    /// Appended for specification downloads.
    pub specification_filename: String,
}

impl SourceLayout {
    pub fn from_config(config: &KgfetchConfig) -> Self {
        Self {
            export_path: config.github.export_path.clone(),
            specification_filename: config.download.specification_filename.clone(),
        }
    }

    /// Suffix identifying what is being downloaded for a node kind.
    pub fn kind_suffix(&self, kind: Kind) -> &str {
        match kind {
            Kind::ReusableComponentSpecification => &self.specification_filename,
            Kind::Repository | Kind::Unclassified => "",
        }
    }

    /// Full source locator for a link of `scheme` whose content is `base`.
    pub fn locator(&self, scheme: LinkScheme, base: &str, suffix: &str) -> String {
        let base = base.trim_end_matches('/');
        match scheme {
            LinkScheme::GitHub => format!("{}/{}/{}", base, self.export_path, suffix),
            LinkScheme::GoogleDrive | LinkScheme::Unclassified => {
                if suffix.is_empty() {
                    base.to_string()
                } else {
                    format!("{}/{}", base, suffix)
                }
            }
        }
    }
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self::from_config(&KgfetchConfig::default())
    }
}

pub struct DownloadOrchestrator<'g> {
    resolver: Resolver<'g>,
    registry: DownloaderRegistry,
    layout: SourceLayout,
}

impl<'g> DownloadOrchestrator<'g> {
    pub fn new(resolver: Resolver<'g>, registry: DownloaderRegistry, layout: SourceLayout) -> Self {
        Self {
            resolver,
            registry,
            layout,
        }
    }

    /// Download `node` into `<download_root>/<identifier>/`.
    ///
    /// Every failure is logged; the returned error only describes it.
    pub fn download(
        &self,
        node: NodeId,
        download_root: &Path,
    ) -> Result<DownloadReport, DownloadError> {
        let result = self.try_download(node, download_root);
        match &result {
            Ok(report) => info!(
                "Downloaded {} of {} links into {}",
                report.fetched(),
                report.outcomes.len(),
                report.destination.display()
            ),
            Err(e) => error!("Can't download {}: {}", self.resolver.describe(node), e),
        }
        result
    }

    fn try_download(
        &self,
        node: NodeId,
        download_root: &Path,
    ) -> Result<DownloadReport, DownloadError> {
        let graph = self.resolver.graph();

        let kind = self.resolver.classify_downloadable(node);
        if kind == Kind::Unclassified {
            return Err(DownloadError::Classification(self.resolver.describe(node)));
        }

        let idtf = graph.system_identifier(node).ok_or_else(|| {
            ResolveError::NotFound(format!("system identifier of #{}", node.0))
        })?;
        if !is_single_component(&idtf) {
            return Err(ResolveError::InvalidState(format!(
                "identifier '{}' is not a plain directory name",
                idtf
            ))
            .into());
        }
        let destination = download_root.join(&idtf);

        std::fs::create_dir_all(&destination).map_err(|source| DownloadError::Io {
            path: destination.clone(),
            source,
        })?;

        let links = match kind {
            Kind::ReusableComponentSpecification => self.resolver.specification_address(node)?,
            Kind::Repository => vec![self.resolver.repository_address(node)?],
            Kind::Unclassified => Vec::new(),
        };
        let suffix = self.layout.kind_suffix(kind);
        info!("Downloading {} ({:?}) from {} link(s)", idtf, kind, links.len());

        let outcomes = links
            .into_iter()
            .map(|link| self.fetch_link(link, suffix, &destination))
            .collect();

        Ok(DownloadReport {
            node,
            kind,
            destination,
            outcomes,
        })
    }

    fn fetch_link(&self, link: NodeId, suffix: &str, destination: &Path) -> LinkOutcome {
        let scheme = self.resolver.classify_link(link);
        if scheme == LinkScheme::Unclassified {
            error!("Link {} has no known URL class", self.resolver.describe(link));
            return LinkOutcome::Unclassified { link };
        }

        let downloader = match self.registry.lookup(scheme) {
            Dispatch::Ready(downloader) => downloader,
            Dispatch::NotImplemented(scheme) => {
                info!("No downloader for {} links, skipping {}", scheme, self.resolver.describe(link));
                return LinkOutcome::Skipped { link, scheme };
            }
        };

        let base = match self.resolver.graph().link_content(link) {
            Ok(base) => base,
            Err(e) => {
                error!("Can't read link {}: {}", self.resolver.describe(link), e);
                return LinkOutcome::Failed {
                    link,
                    error: e.into(),
                };
            }
        };

        let source = self.layout.locator(scheme, &base, suffix);
        match downloader.fetch(&source, destination) {
            Ok(()) => LinkOutcome::Fetched { link, source },
            Err(e) => {
                warn!("{} failed for {}: {}", downloader.name(), source, e);
                LinkOutcome::Failed {
                    link,
                    error: e.into(),
                }
            }
        }
    }
}

/// True when `name` is exactly one normal path component.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
