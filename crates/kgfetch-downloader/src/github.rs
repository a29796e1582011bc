//! GitHub fetching through a Subversion-style export tool

use crate::protocol::{FetchError, ProtocolDownloader};
use kgfetch_core::config::GitHubConfig;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Exports a GitHub path (e.g. `<repo>/trunk/`) into a directory by running
/// `<program> export --force -q <source> <dest>`.
pub struct GitHubExportDownloader {
    program: String,
}

impl GitHubExportDownloader {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &GitHubConfig) -> Self {
        Self::new(config.program.clone())
    }

    fn command(&self, source: &str, dest_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("export")
            .arg("--force")
            .arg("-q")
            .arg(source)
            .arg(dest_dir);
        cmd
    }
}

impl ProtocolDownloader for GitHubExportDownloader {
    fn fetch(&self, source: &str, dest_dir: &Path) -> Result<(), FetchError> {
        info!("Exporting {} into {}", source, dest_dir.display());

        let output = self
            .command(source, dest_dir)
            .output()
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(FetchError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("Export of {} finished", source);
        Ok(())
    }

    fn name(&self) -> &str {
        "github-export"
    }
}
