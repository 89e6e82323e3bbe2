//! Build Use Case implementation

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use crate::application::clean::CleanUseCase;
use crate::application::plan::BuildPlan;
use crate::application::rewrite::rewrite_html;
use crate::application::tasks::{run_task, TaskReport};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::TaskKind;
use crate::error::{AssetlineError, AssetlineResult};

use super::event::BuildEvent;
use super::options::BuildOptions;
use super::result::{BuildReport, TaskFailure};

/// Build use case
///
/// The file system is shared across task threads, so it lives behind an `Arc`.
pub struct BuildUseCase<FS: FileSystem + 'static> {
    fs: Arc<FS>,
}

impl<FS: FileSystem + 'static> BuildUseCase<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs: Arc::new(fs) }
    }

    /// Run the pipeline described by `options`.
    pub async fn execute<F>(
        &self,
        plan: Arc<BuildPlan>,
        options: &BuildOptions,
        on_event: F,
    ) -> AssetlineResult<BuildReport>
    where
        F: Fn(BuildEvent),
    {
        let started = Instant::now();
        let mut report = BuildReport::default();

        if options.clean {
            let cleaned = CleanUseCase::new(Arc::clone(&self.fs)).execute(&plan)?;
            on_event(BuildEvent::Cleaned {
                dir: cleaned.out_dir.display().to_string(),
                removed: cleaned.removed,
            });
            report.cleaned = Some(cleaned);
        }

        let (tasks, failures) = self.run_parallel(&plan, &options.tasks, &on_event).await;
        report.tasks = tasks;

        if let Some(first) = failures.into_iter().next() {
            if options.rewrite {
                on_event(BuildEvent::RewriteSkipped);
            }
            on_event(BuildEvent::BuildComplete {
                success: false,
                files: report.files_written(),
                duration_ms: started.elapsed().as_millis() as u64,
            });
            return Err(first.error);
        }

        if options.rewrite && plan.rewrite.enabled {
            let rewritten = rewrite_html(&plan, self.fs.as_ref())?;
            on_event(BuildEvent::RewriteComplete {
                file: rewritten.document.display().to_string(),
                substitutions: rewritten.substitutions(),
                warnings: rewritten.warnings.clone(),
            });
            report.rewrite = Some(rewritten);
        }

        report.duration = started.elapsed();
        on_event(BuildEvent::BuildComplete {
            success: true,
            files: report.files_written(),
            duration_ms: report.duration.as_millis() as u64,
        });
        tracing::info!(
            files = report.files_written(),
            elapsed_ms = report.duration.as_millis() as u64,
            "build finished"
        );
        Ok(report)
    }

    /// Run `tasks` concurrently and wait for all of them.
    ///
    /// Both lists come back in `tasks` order regardless of completion order.
    async fn run_parallel<F>(
        &self,
        plan: &Arc<BuildPlan>,
        tasks: &[TaskKind],
        on_event: &F,
    ) -> (Vec<TaskReport>, Vec<TaskFailure>)
    where
        F: Fn(BuildEvent),
    {
        let mut join_set = JoinSet::new();
        for &task in tasks {
            on_event(BuildEvent::TaskStarted { task });
            let plan = Arc::clone(plan);
            let fs = Arc::clone(&self.fs);
            join_set.spawn_blocking(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_task(task, &plan, fs.as_ref())
                }))
                .unwrap_or_else(|payload| {
                    Err(AssetlineError::TaskAborted {
                        task: task.name().to_string(),
                        message: panic_message(payload.as_ref()),
                    })
                });
                (task, result)
            });
        }

        let mut pending: HashSet<TaskKind> = tasks.iter().copied().collect();
        let mut reports = Vec::new();
        let mut failures = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((task, Ok(task_report))) => {
                    pending.remove(&task);
                    on_event(BuildEvent::TaskComplete {
                        task,
                        files: task_report.written.len(),
                        duration_ms: task_report.duration.as_millis() as u64,
                    });
                    reports.push(task_report);
                }
                Ok((task, Err(error))) => {
                    pending.remove(&task);
                    tracing::error!(task = task.name(), error = %error, "task failed");
                    on_event(BuildEvent::TaskFailed {
                        task,
                        kind: error.kind().to_string(),
                        message: error.to_string(),
                    });
                    failures.push(TaskFailure { task, error });
                }
                Err(join_error) => {
                    tracing::error!(error = %join_error, "task did not join");
                }
            }
        }

        for task in pending {
            failures.push(TaskFailure {
                task,
                error: AssetlineError::TaskAborted {
                    task: task.name().to_string(),
                    message: "cancelled".to_string(),
                },
            });
        }

        let position = |kind: TaskKind| tasks.iter().position(|t| *t == kind).unwrap_or(usize::MAX);
        reports.sort_by_key(|r| position(r.task));
        failures.sort_by_key(|f| position(f.task));
        (reports, failures)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panicked".to_string())
}
