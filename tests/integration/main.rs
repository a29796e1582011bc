//! Integration tests for kgfetch
//!
//! These tests drive a snapshot on disk through the resolver, the download
//! orchestrator and the CLI binary.

use kgfetch_core::{GraphQuery, Keynodes, load_snapshot, save_snapshot};
use kgfetch_downloader::{
    DownloadOrchestrator, DownloaderRegistry, FetchError, LinkOutcome, ProtocolDownloader,
    SourceLayout,
};
use kgfetch_resolver::{Kind, LinkScheme, Resolver};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A specification mirrored on GitHub and Google Drive, the component it
/// describes, and that component's dependency chain.
const COMPONENTS_SNAPSHOT: &str = r#"{
  "nodes": [
    { "idtf": "concept_reusable_component_specification", "kind": "class" },
    { "idtf": "concept_reusable_component", "kind": "class" },
    { "idtf": "concept_repository", "kind": "class" },
    { "idtf": "concept_github_url", "kind": "class" },
    { "idtf": "concept_google_drive_url", "kind": "class" },
    { "idtf": "nrel_alternative_addresses", "kind": "relation" },
    { "idtf": "nrel_repository_address", "kind": "relation" },
    { "idtf": "nrel_component_address", "kind": "relation" },
    { "idtf": "nrel_component_dependencies", "kind": "relation" },
    { "idtf": "nrel_installation_method", "kind": "relation" },
    { "idtf": "nrel_installation_script", "kind": "relation" },

    { "idtf": "part_ui_specification", "kind": "node" },
    { "idtf": "_node_spec_addresses", "kind": "tuple" },
    { "idtf": "_node_spec_address", "kind": "node" },
    { "idtf": "_node_spec_github", "kind": "link", "content": "https://github.com/ostis-ai/part-ui" },
    { "idtf": "_node_spec_drive", "kind": "link", "content": "https://drive.google.com/part-ui" },

    { "idtf": "part_ui", "kind": "node" },
    { "idtf": "_node_part_ui_address", "kind": "link", "content": "https://github.com/ostis-ai/part-ui" },
    { "idtf": "_node_part_ui_method", "kind": "node" },
    { "idtf": "_node_part_ui_script", "kind": "link", "content": "./scripts/install.sh" },
    { "idtf": "_node_part_ui_deps", "kind": "node" },

    { "idtf": "sc_web", "kind": "node" },
    { "idtf": "_node_sc_web_address", "kind": "node" },
    { "idtf": "_node_sc_web_url", "kind": "link", "content": "https://github.com/ostis-ai/sc-web" },
    { "idtf": "_node_sc_web_deps", "kind": "node" },

    { "idtf": "sc_machine", "kind": "node" }
  ],
  "edges": [
    { "source": "concept_reusable_component_specification", "target": "part_ui_specification", "kind": "access" },
    { "source": "part_ui_specification", "target": "_node_spec_addresses", "kind": "common", "relation": "nrel_alternative_addresses" },
    { "source": "_node_spec_addresses", "target": "_node_spec_address", "kind": "access" },
    { "source": "_node_spec_address", "target": "_node_spec_github", "kind": "access" },
    { "source": "_node_spec_address", "target": "_node_spec_drive", "kind": "access" },
    { "source": "concept_github_url", "target": "_node_spec_github", "kind": "access" },
    { "source": "concept_google_drive_url", "target": "_node_spec_drive", "kind": "access" },

    { "source": "concept_reusable_component", "target": "part_ui", "kind": "access" },
    { "source": "part_ui", "target": "_node_part_ui_address", "kind": "common", "relation": "nrel_component_address" },
    { "source": "part_ui", "target": "_node_part_ui_method", "kind": "common", "relation": "nrel_installation_method" },
    { "source": "part_ui", "target": "_node_part_ui_script", "kind": "common", "relation": "nrel_installation_script" },
    { "source": "part_ui", "target": "_node_part_ui_deps", "kind": "common", "relation": "nrel_component_dependencies" },
    { "source": "_node_part_ui_deps", "target": "sc_web", "kind": "access" },

    { "source": "concept_repository", "target": "sc_web", "kind": "access" },
    { "source": "sc_web", "target": "_node_sc_web_address", "kind": "common", "relation": "nrel_repository_address" },
    { "source": "_node_sc_web_address", "target": "_node_sc_web_url", "kind": "access" },
    { "source": "concept_github_url", "target": "_node_sc_web_url", "kind": "access" },
    { "source": "sc_web", "target": "_node_sc_web_deps", "kind": "common", "relation": "nrel_component_dependencies" },
    { "source": "_node_sc_web_deps", "target": "sc_machine", "kind": "access" }
  ]
}"#;

/// Create a project directory holding `graph.json`.
fn create_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("graph.json"), COMPONENTS_SNAPSHOT).unwrap();
    temp_dir
}

type Calls = Arc<Mutex<Vec<(String, PathBuf)>>>;

struct RecordingDownloader(Calls);

impl ProtocolDownloader for RecordingDownloader {
    fn fetch(&self, source: &str, dest_dir: &Path) -> Result<(), FetchError> {
        std::fs::write(dest_dir.join("fetched.txt"), source).unwrap();
        self.0
            .lock()
            .unwrap()
            .push((source.to_string(), dest_dir.to_path_buf()));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn kgfetch(project: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kgfetch"));
    cmd.arg("--root").arg(project);
    cmd
}

/// Test that a snapshot loaded from disk drives the whole download flow
#[test]
fn test_snapshot_to_download() {
    let project = create_project();
    let mut graph = load_snapshot(&project.path().join("graph.json")).unwrap();
    graph.ensure_keynodes();
    let keynodes = Keynodes::resolve(&graph).unwrap();

    let calls = Calls::default();
    let mut registry = DownloaderRegistry::new();
    registry.register(
        LinkScheme::GitHub,
        Box::new(RecordingDownloader(Arc::clone(&calls))),
    );
    let orchestrator = DownloadOrchestrator::new(
        Resolver::new(&graph, &keynodes),
        registry,
        SourceLayout::default(),
    );
    let download_root = project.path().join("specifications");

    let specification = graph.find_by_identifier("part_ui_specification").unwrap();
    let report = orchestrator.download(specification, &download_root).unwrap();
    assert_eq!(report.kind, Kind::ReusableComponentSpecification);
    assert_eq!(report.outcomes.len(), 2);
    assert!(matches!(report.outcomes[0], LinkOutcome::Fetched { .. }));
    assert!(matches!(
        report.outcomes[1],
        LinkOutcome::Skipped {
            scheme: LinkScheme::GoogleDrive,
            ..
        }
    ));

    let repository = graph.find_by_identifier("sc_web").unwrap();
    let report = orchestrator.download(repository, &download_root).unwrap();
    assert_eq!(report.kind, Kind::Repository);

    let calls = calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            (
                "https://github.com/ostis-ai/part-ui/trunk/specification.scs".to_string(),
                download_root.join("part_ui_specification"),
            ),
            (
                "https://github.com/ostis-ai/sc-web/trunk/".to_string(),
                download_root.join("sc_web"),
            ),
        ]
    );
    assert!(download_root.join("sc_web").join("fetched.txt").is_file());
}

/// Test that resolution answers survive a save/load cycle
#[test]
fn test_resolution_survives_snapshot_roundtrip() {
    let project = create_project();
    let mut graph = load_snapshot(&project.path().join("graph.json")).unwrap();
    graph.ensure_keynodes();

    let saved = project.path().join("out").join("graph.json");
    save_snapshot(&graph, &saved).unwrap();
    let reloaded = load_snapshot(&saved).unwrap();
    let keynodes = Keynodes::resolve(&reloaded).unwrap();
    let resolver = Resolver::new(&reloaded, &keynodes);

    let part_ui = reloaded.find_by_identifier("part_ui").unwrap();
    assert!(resolver.is_reusable(part_ui));
    assert!(resolver.is_installation_method_valid(part_ui));
    assert_eq!(
        resolver.install_scripts(part_ui).unwrap(),
        vec!["./scripts/install.sh"]
    );
    assert_eq!(
        resolver
            .component_dir_name(part_ui, Path::new("specifications"))
            .unwrap(),
        Some(PathBuf::from("specifications/part-ui"))
    );

    let closure: Vec<String> = resolver
        .dependency_closure(part_ui)
        .into_iter()
        .filter_map(|id| reloaded.system_identifier(id))
        .collect();
    assert_eq!(closure, vec!["sc_machine", "sc_web"]);
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = Command::new(env!("CARGO_BIN_EXE_kgfetch"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("kgfetch"));
    assert!(stdout.contains("Download reusable components described in a knowledge graph"));
}

#[test]
fn test_cli_inspect() {
    let project = create_project();

    let output = kgfetch(project.path())
        .args(["inspect", "part_ui"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://github.com/ostis-ai/part-ui"));
    assert!(stdout.contains("reusable:            true"));
    assert!(stdout.contains("./scripts/install.sh"));
    assert!(stdout.contains("sc_web"));
}

#[test]
fn test_cli_deps_in_install_order() {
    let project = create_project();

    let output = kgfetch(project.path())
        .args(["deps", "part_ui"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["sc_machine", "sc_web"]);
}

/// A missing export tool fails the link, not the node.
#[test]
fn test_cli_download_with_missing_export_tool() {
    let project = create_project();

    let output = kgfetch(project.path())
        .env("KGFETCH_SVN_PROGRAM", "kgfetch-no-such-export-tool")
        .env_remove("KGFETCH_DOWNLOAD_ROOT")
        .env_remove("KGFETCH_GRAPH_SNAPSHOT")
        .args(["download", "sc_web"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(project.path().join("specifications").join("sc_web").is_dir());
}

#[test]
fn test_cli_download_unknown_identifier_fails() {
    let project = create_project();

    let output = kgfetch(project.path())
        .env_remove("KGFETCH_DOWNLOAD_ROOT")
        .env_remove("KGFETCH_GRAPH_SNAPSHOT")
        .args(["download", "no_such_component"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!project.path().join("specifications").exists());
}

#[test]
fn test_cli_specs_lists_matching_files() {
    let project = create_project();
    let dir = project.path().join("specifications").join("part_ui_specification");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("specification.scs"), "part_ui <- concept_reusable_component;;").unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let output = kgfetch(project.path())
        .arg("specs")
        .arg(&dir)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("specification.scs"));
}
