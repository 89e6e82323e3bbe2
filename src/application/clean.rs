//! Clean Use Case
//!
//! Removes the output directory before a build.

use std::path::PathBuf;

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::error::{AssetlineError, AssetlineResult};

/// Result of a clean operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanResult {
    pub out_dir: PathBuf,
    /// Whether there was anything to remove
    pub removed: bool,
}

/// Clean use case - wipes the output directory
pub struct CleanUseCase<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> CleanUseCase<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    /// Remove `plan.out_dir` and everything under it.
    ///
    /// Refuses an output directory that is the project root or lies
    /// outside it.
    pub fn execute(&self, plan: &BuildPlan) -> AssetlineResult<CleanResult> {
        let out_dir = plan.out_dir.clone();
        if out_dir == plan.project_root || !out_dir.starts_with(&plan.project_root) {
            return Err(AssetlineError::PathEscape {
                path: out_dir,
                root: plan.project_root.clone(),
            });
        }

        let removed = self.fs.exists(&out_dir);
        self.fs.remove_dir_all(&out_dir)?;
        tracing::debug!(dir = %out_dir.display(), removed, "cleaned output directory");

        Ok(CleanResult { out_dir, removed })
    }
}
