//! CLI command implementations

use anyhow::Context;
use kgfetch_core::{GraphQuery, Keynodes, KgfetchConfig, KnowledgeGraph, NodeId, load_snapshot};
use kgfetch_downloader::{
    DownloadOrchestrator, DownloaderRegistry, LinkOutcome, SourceLayout, build_globset,
    specification_files,
};
use kgfetch_resolver::Resolver;
use std::path::{Path, PathBuf};

/// Config plus a loaded graph with its keynodes bound.
struct Session {
    root: PathBuf,
    config: KgfetchConfig,
    graph: KnowledgeGraph,
    keynodes: Keynodes,
}

impl Session {
    fn open(root: &Path, graph_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = KgfetchConfig::load(root)?;
        let path = graph_path.unwrap_or_else(|| config.snapshot_path(root));

        let mut graph = load_snapshot(&path)
            .with_context(|| format!("failed to load graph snapshot {}", path.display()))?;
        graph.ensure_keynodes();
        let keynodes = Keynodes::resolve(&graph)?;

        tracing::info!(
            "Loaded {} nodes, {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );

        Ok(Session {
            root: root.to_path_buf(),
            config,
            graph,
            keynodes,
        })
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.graph, &self.keynodes)
    }

    fn find(&self, identifier: &str) -> anyhow::Result<NodeId> {
        self.graph
            .find_by_identifier(identifier)
            .with_context(|| format!("no node named '{}' in the graph", identifier))
    }

    fn label(&self, node: NodeId) -> String {
        self.graph
            .system_identifier(node)
            .unwrap_or_else(|| format!("#{}", node.0))
    }
}

pub fn download(root: &Path, graph: Option<PathBuf>, identifiers: &[String]) -> anyhow::Result<()> {
    let session = Session::open(root, graph)?;
    let download_root = session.config.download_root(&session.root);
    let orchestrator = DownloadOrchestrator::new(
        session.resolver(),
        DownloaderRegistry::with_defaults(&session.config),
        SourceLayout::from_config(&session.config),
    );

    let mut failed = Vec::new();
    for identifier in identifiers {
        let node = match session.find(identifier) {
            Ok(node) => node,
            Err(e) => {
                tracing::error!("{}", e);
                failed.push(identifier.as_str());
                continue;
            }
        };

        let report = match orchestrator.download(node, &download_root) {
            Ok(report) => report,
            Err(_) => {
                failed.push(identifier.as_str());
                continue;
            }
        };

        for outcome in &report.outcomes {
            match outcome {
                LinkOutcome::Fetched { source, .. } => tracing::info!("  fetched {}", source),
                LinkOutcome::Skipped { link, scheme } => {
                    tracing::info!("  skipped {} ({} links are not supported)", session.label(*link), scheme)
                }
                LinkOutcome::Unclassified { link } => {
                    tracing::warn!("  unclassified link {}", session.label(*link))
                }
                LinkOutcome::Failed { link, error } => {
                    tracing::warn!("  failed {}: {}", session.label(*link), error)
                }
            }
        }
        if !report.is_clean() {
            tracing::warn!("{} downloaded with link failures", identifier);
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("failed to download: {}", failed.join(", "));
    }
    Ok(())
}

pub fn inspect(root: &Path, graph: Option<PathBuf>, identifier: &str) -> anyhow::Result<()> {
    let session = Session::open(root, graph)?;
    let node = session.find(identifier)?;
    let resolver = session.resolver();
    let download_root = session.config.download_root(&session.root);

    println!("{}", identifier);
    println!("  kind:                {:?}", resolver.classify_downloadable(node));

    let address = resolver.component_address_string(node)?;
    println!(
        "  address:             {}",
        if address.is_empty() { "-" } else { address.as_str() }
    );
    if let Some(dir) = resolver.component_dir_name(node, &download_root)? {
        println!("  directory:           {}", dir.display());
    }
    println!("  reusable:            {}", resolver.is_reusable(node));
    println!(
        "  installation method: {}",
        if resolver.is_installation_method_valid(node) { "valid" } else { "missing" }
    );

    let scripts = resolver.install_scripts(node)?;
    println!("  install scripts:     {}", scripts.len());
    for script in &scripts {
        println!("    {}", script);
    }

    let dependencies = resolver.component_dependencies(node);
    println!("  dependencies:        {}", dependencies.len());
    for dependency in dependencies {
        println!("    {}", session.label(dependency));
    }
    Ok(())
}

pub fn deps(root: &Path, graph: Option<PathBuf>, identifier: &str) -> anyhow::Result<()> {
    let session = Session::open(root, graph)?;
    let node = session.find(identifier)?;

    for dependency in session.resolver().dependency_closure(node) {
        println!("{}", session.label(dependency));
    }
    Ok(())
}

pub fn specs(root: &Path, dir: Option<PathBuf>) -> anyhow::Result<()> {
    let config = KgfetchConfig::load(root)?;
    let dir = dir.unwrap_or_else(|| config.download_root(root));
    let patterns = build_globset(&config.specs.patterns)?;

    let files = specification_files(&dir, &patterns)
        .with_context(|| format!("failed to read {}", dir.display()))?;
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}
