//! Source resolution
//!
//! Expands a task's patterns into concrete files. Patterns are resolved in
//! order; within a glob, files are visited in file-name order so outputs are
//! reproducible. A file matched by several patterns is listed once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::value_objects::{describe_patterns, SourcePattern};
use crate::error::{AssetlineError, AssetlineResult};

/// A matched input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the pattern's base directory
    pub relative: PathBuf,
}

impl SourceFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Resolve `patterns` for `task`.
///
/// A literal pattern that names a missing file is `SourceNotFound`. When no
/// pattern matches anything the result is `NoMatches` unless `allow_empty`.
pub fn resolve_sources(
    task: &str,
    patterns: &[SourcePattern],
    allow_empty: bool,
) -> AssetlineResult<Vec<SourceFile>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        if let Some(path) = pattern.literal_path() {
            if !path.is_file() {
                return Err(AssetlineError::SourceNotFound { path });
            }
            if seen.insert(path.clone()) {
                let relative = path
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_default();
                files.push(SourceFile { path, relative });
            }
            continue;
        }

        let search_dir = pattern.search_dir();
        for path in walk_files(&search_dir)? {
            if pattern.matches(&path) && seen.insert(path.clone()) {
                let relative = path
                    .strip_prefix(&search_dir)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| path.clone());
                files.push(SourceFile { path, relative });
            }
        }
    }

    if files.is_empty() && !allow_empty {
        return Err(AssetlineError::NoMatches {
            task: task.to_string(),
            patterns: describe_patterns(patterns),
        });
    }

    tracing::debug!(task, count = files.len(), "resolved sources");
    Ok(files)
}

/// Every regular file under `dir`, sorted by name at each level.
///
/// A missing directory yields nothing; hidden files and ignore files are not
/// consulted.
fn walk_files(dir: &Path) -> AssetlineResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| AssetlineError::Io(std::io::Error::other(e.to_string())))?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
