//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go to a temporary file in the target directory and are renamed
/// into place, so readers never observe a half-written output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

fn ensure_parent(path: &Path) -> FsResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;
        }
    }
    Ok(())
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        ensure_parent(path)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| FsError::at(dir, e))?;
        temp.write_all(content).map_err(|e| FsError::at(path, e))?;
        temp.as_file().sync_all().map_err(|e| FsError::at(path, e))?;
        temp.persist(path)
            .map_err(|e| FsError::at(path, e.error))?;

        tracing::trace!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        ensure_parent(to)?;
        std::fs::copy(from, to).map_err(|e| FsError::at(from, e))?;
        tracing::trace!(from = %from.display(), to = %to.display(), "copied file");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        match std::fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FsError::at(path, e)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }
}
