//! Configuration for downloads, fetch tooling and graph loading.
//!
//! Load order: `.kgfetch/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".kgfetch";
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KgfetchConfig {
    pub download: DownloadConfig,
    pub github: GitHubConfig,
    pub specs: SpecsConfig,
    pub graph: GraphConfig,
}

/// Where and how downloaded artifacts land.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Download root. Relative paths resolve against the project root.
    pub root: PathBuf,
    /// File name a specification download is expected to produce.
    pub specification_filename: String,
}

/// Export-based GitHub fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Export tool invoked for each fetch.
    pub program: String,
    /// Path segment appended to the repository URL before exporting.
    pub export_path: String,
}

/// Specification-file discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecsConfig {
    pub patterns: Vec<String>,
}

/// Graph snapshot location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub snapshot: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("specifications"),
            specification_filename: "specification.scs".to_string(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            program: "svn".to_string(),
            export_path: "trunk".to_string(),
        }
    }
}

impl Default for SpecsConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["*.scs".to_string()],
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("graph.json"),
        }
    }
}

/// Helper to parse an env value and apply it to a config field.
fn env_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    target: &mut T,
) {
    if let Some(v) = lookup(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl KgfetchConfig {
    /// Load config from `.kgfetch/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|var| std::env::var(var).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `KGFETCH_*` overrides read through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        env_override(&lookup, "KGFETCH_DOWNLOAD_ROOT", &mut self.download.root);
        env_override(&lookup, "KGFETCH_SVN_PROGRAM", &mut self.github.program);
        env_override(&lookup, "KGFETCH_GRAPH_SNAPSHOT", &mut self.graph.snapshot);
    }

    pub fn validate(&self) -> Result<()> {
        if self.specs.patterns.is_empty() {
            anyhow::bail!("specs.patterns must list at least one pattern");
        }
        if self.download.specification_filename.contains('/') {
            anyhow::bail!(
                "download.specification_filename ({}) must be a bare file name",
                self.download.specification_filename
            );
        }
        Ok(())
    }

    /// Download root resolved against `project_root`.
    pub fn download_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.download.root)
    }

    /// Snapshot path resolved against `project_root`.
    pub fn snapshot_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.graph.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KgfetchConfig::default();
        assert_eq!(config.download.root, PathBuf::from("specifications"));
        assert_eq!(config.download.specification_filename, "specification.scs");
        assert_eq!(config.github.program, "svn");
        assert_eq!(config.github.export_path, "trunk");
        assert_eq!(config.specs.patterns, vec!["*.scs".to_string()]);
        assert_eq!(config.graph.snapshot, PathBuf::from("graph.json"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[download]
root = "downloads"

[github]
program = "/usr/local/bin/svn"
"#;
        let config: KgfetchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.download.root, PathBuf::from("downloads"));
        assert_eq!(config.github.program, "/usr/local/bin/svn");
        // Defaults for unspecified fields
        assert_eq!(config.github.export_path, "trunk");
        assert_eq!(config.download.specification_filename, "specification.scs");
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = KgfetchConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(config.specs.patterns.len(), 1);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = KgfetchConfig::default();
        config.apply_env_overrides(|var| match var {
            "KGFETCH_DOWNLOAD_ROOT" => Some("/tmp/kb".to_string()),
            "KGFETCH_SVN_PROGRAM" => Some("svn-mock".to_string()),
            _ => None,
        });
        assert_eq!(config.download.root, PathBuf::from("/tmp/kb"));
        assert_eq!(config.github.program, "svn-mock");
        assert_eq!(config.graph.snapshot, PathBuf::from("graph.json"));
    }

    #[test]
    fn test_load_rejects_empty_patterns() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), "[specs]\npatterns = []\n").unwrap();

        let err = KgfetchConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("specs.patterns"));
    }

    #[test]
    fn test_validate_rejects_nested_specification_filename() {
        let mut config = KgfetchConfig::default();
        config.download.specification_filename = "kb/specification.scs".to_string();
        assert!(config.validate().is_err());
    }
}
