//! Transform tasks
//!
//! Each task is a stateless function from the build plan to the files it
//! wrote. Tasks own disjoint output subtrees and may run concurrently.

mod assets;
mod dependencies;
mod html;
mod scripts;
mod styles;


use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::TaskKind;
use crate::error::AssetlineResult;

/// Files written by one task run
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task: TaskKind,
    pub written: Vec<PathBuf>,
    pub duration: Duration,
}

/// Run a single transform task.
pub fn run_task<F: FileSystem + ?Sized>(
    task: TaskKind,
    plan: &BuildPlan,
    fs: &F,
) -> AssetlineResult<TaskReport> {
    let started = Instant::now();
    tracing::debug!(task = task.name(), "task started");

    let result = match task {
        TaskKind::Styles => styles::run(plan, fs),
        TaskKind::Scripts => scripts::run(plan, fs),
        TaskKind::Html => html::run(plan, fs),
        TaskKind::Assets => assets::run(plan, fs),
        TaskKind::Dependencies => dependencies::run(plan, fs),
    };

    match result {
        Ok(written) => {
            let duration = started.elapsed();
            tracing::debug!(
                task = task.name(),
                files = written.len(),
                elapsed_ms = duration.as_millis() as u64,
                "task finished"
            );
            Ok(TaskReport {
                task,
                written,
                duration,
            })
        }
        Err(e) => {
            tracing::debug!(task = task.name(), error = %e, "task failed");
            Err(e)
        }
    }
}
