//! Test utilities for kgfetch-core

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary project with a specific file structure
pub fn create_project_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// A hand-written snapshot describing one repository hosted on GitHub.
pub const REPOSITORY_SNAPSHOT: &str = r#"{
  "nodes": [
    { "idtf": "concept_repository", "kind": "class" },
    { "idtf": "concept_github_url", "kind": "class" },
    { "idtf": "nrel_repository_address", "kind": "relation" },
    { "idtf": "sc_web", "kind": "node" },
    { "idtf": "sc_web_address", "kind": "node" },
    { "idtf": "_node_url", "kind": "link", "content": "https://github.com/ostis-ai/sc-web" }
  ],
  "edges": [
    { "source": "concept_repository", "target": "sc_web", "kind": "access" },
    { "source": "sc_web", "target": "sc_web_address", "kind": "common", "relation": "nrel_repository_address" },
    { "source": "sc_web_address", "target": "_node_url", "kind": "access" },
    { "source": "concept_github_url", "target": "_node_url", "kind": "access" }
  ]
}"#;

/// Write `REPOSITORY_SNAPSHOT` into a fresh project and return its path.
pub fn create_snapshot_project() -> (TempDir, PathBuf) {
    let temp_dir = create_project_with_structure(&[("graph.json", REPOSITORY_SNAPSHOT)]);
    let path = temp_dir.path().join("graph.json");
    (temp_dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_snapshot_project() {
        let (temp_dir, path) = create_snapshot_project();
        assert!(path.exists());
        assert!(temp_dir.path().join("graph.json").is_file());
    }
}
