//! Specification-file discovery in downloaded component directories

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

/// Compile the configured file-name patterns.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid pattern '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("failed to build specification glob set")
}

/// Regular files directly inside `dir` whose name matches `patterns`, sorted.
pub fn specification_files(dir: &Path, patterns: &GlobSet) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if patterns.is_match(entry.file_name()) {
            files.push(entry.path());
        }
    }
    files.sort();
    tracing::debug!("Found {} specification file(s) in {}", files.len(), dir.display());
    Ok(files)
}
