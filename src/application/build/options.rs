//! Build options

use crate::domain::value_objects::TaskKind;

/// Which steps of the pipeline to run
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Wipe the output directory first
    pub clean: bool,
    /// Transform tasks to run in parallel
    pub tasks: Vec<TaskKind>,
    /// Run the rewrite step after the tasks
    pub rewrite: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            clean: true,
            tasks: TaskKind::ALL.to_vec(),
            rewrite: true,
        }
    }
}

impl BuildOptions {
    /// The full pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// One task, no clean, no rewrite
    pub fn single(task: TaskKind) -> Self {
        Self {
            clean: false,
            tasks: vec![task],
            rewrite: false,
        }
    }

    /// Only the rewrite step
    pub fn rewrite_only() -> Self {
        Self {
            clean: false,
            tasks: Vec::new(),
            rewrite: true,
        }
    }
}
