//! Async file utilities for Promptshelf.
//!
//! Provides file discovery and reading operations used by the content
//! store.

use async_walkdir::WalkDir;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Options for discovering content files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// File extensions to match (without dot). Empty matches everything.
    pub extensions: Vec<&'static str>,
}

impl FindOptions {
    /// Options matching markdown and MDX documents.
    pub fn markdown() -> Self {
        Self {
            extensions: vec!["md", "mdx"],
        }
    }

    /// Options matching YAML documents.
    pub fn yaml() -> Self {
        Self {
            extensions: vec!["yaml", "yml"],
        }
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

fn walk_error(err: impl std::fmt::Display) -> Error {
    Error::io(std::io::Error::other(err.to_string()))
}

/// Find all files matching criteria in a directory.
///
/// Results are sorted by relative path so callers see a stable order
/// regardless of directory iteration order.
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !exists(base_path).await {
        return Err(Error::not_found(format!(
            "Directory not found: {}",
            base_path.display()
        )));
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base_path);

    while let Some(entry_result) = walker.next().await {
        let entry = entry_result.map_err(walk_error)?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        if !options.matches_extension(&path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        files.push(FileInfo {
            path: path.clone(),
            stem,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("found {} files under {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
