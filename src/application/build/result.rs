//! Build result types

use std::time::Duration;

use crate::application::clean::CleanResult;
use crate::application::rewrite::RewriteReport;
use crate::application::tasks::TaskReport;
use crate::domain::value_objects::TaskKind;

/// A task that did not complete
#[derive(Debug)]
pub struct TaskFailure {
    pub task: TaskKind,
    pub error: crate::error::AssetlineError,
}

/// Outcome of a successful build
#[derive(Debug, Default)]
pub struct BuildReport {
    pub cleaned: Option<CleanResult>,
    /// Per-task reports, in pipeline order
    pub tasks: Vec<TaskReport>,
    pub rewrite: Option<RewriteReport>,
    pub duration: Duration,
}

impl BuildReport {
    /// Total files written by transform tasks
    pub fn files_written(&self) -> usize {
        self.tasks.iter().map(|t| t.written.len()).sum()
    }

    pub fn task(&self, kind: TaskKind) -> Option<&TaskReport> {
        self.tasks.iter().find(|t| t.task == kind)
    }
}
