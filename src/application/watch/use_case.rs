//! Watch Use Case implementation

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::rewrite::rewrite_html;
use crate::application::tasks::run_task;
use crate::domain::value_objects::TaskKind;
use crate::error::{AssetlineError, AssetlineResult};
use crate::infrastructure::fs::LocalFs;

use super::event::{WatchEvent, WatchOptions, WatcherState};
use super::registry::{ContentTracker, WatchRegistry};

/// Events arriving right after registration are replayed creations, not edits.
const STARTUP_COOLDOWN_MS: u64 = 300;

/// Watch Use Case
///
/// Main entry point for the `assetline watch` command.
pub struct WatchUseCase {
    options: WatchOptions,
    registry: WatchRegistry,
}

impl WatchUseCase {
    /// Create a new WatchUseCase
    pub fn new(options: WatchOptions) -> AssetlineResult<Self> {
        let registry = WatchRegistry::from_plan(&options.plan)?;
        Ok(Self { options, registry })
    }

    pub fn registry(&self) -> &WatchRegistry {
        &self.registry
    }

    /// Start watching (blocking)
    ///
    /// Blocks until the running flag is cleared. Task failures are reported
    /// through `on_event` and do not stop the loop.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> AssetlineResult<()>
    where
        F: Fn(WatchEvent),
    {
        let plan = &self.options.plan;
        on_event(WatchEvent::WatchStarted {
            project: plan.project_root.display().to_string(),
            watching: self.registry.describe(),
        });

        let mut tracker = ContentTracker::new();
        tracker.prime(&self.registry);

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| AssetlineError::Watch(e.to_string()))?;

        watcher
            .watch(&plan.project_root, RecursiveMode::Recursive)
            .map_err(|e| AssetlineError::Watch(e.to_string()))?;

        let cooldown_end = Instant::now() + Duration::from_millis(STARTUP_COOLDOWN_MS);
        while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
            let _ = rx.recv_timeout(Duration::from_millis(50));
        }

        let mut state = WatcherState::new(self.options.debounce);
        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                if !self.registry.tasks_for(&path).is_empty() && tracker.observe(&path) {
                    state.add_change(path);
                }
            }

            if state.should_run() {
                let changes = state.take_changes();
                self.process_changes(&changes, &on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    /// Re-run every task owning one of `changes`, in pipeline order.
    pub(super) fn process_changes(&self, changes: &[PathBuf], on_event: &impl Fn(WatchEvent)) {
        let plan = &self.options.plan;
        let mut tasks: Vec<TaskKind> = Vec::new();
        for path in changes {
            on_event(WatchEvent::FileChanged {
                path: plan.project_relative(path),
            });
            for task in self.registry.tasks_for(path) {
                if !tasks.contains(&task) {
                    tasks.push(task);
                }
            }
        }
        tasks.sort_by_key(|t| TaskKind::ALL.iter().position(|k| k == t));

        let fs = LocalFs::new();
        let mut needs_rewrite = false;
        for task in tasks {
            on_event(WatchEvent::TaskStarted { task });
            match run_task(task, plan, &fs) {
                Ok(report) => {
                    needs_rewrite |= task.affects_rewrite();
                    on_event(WatchEvent::TaskComplete {
                        task,
                        files: report.written.len(),
                        duration_ms: report.duration.as_millis() as u64,
                    });
                }
                Err(error) => {
                    tracing::warn!(task = task.name(), error = %error, "task failed in watch mode");
                    on_event(WatchEvent::TaskFailed {
                        task,
                        kind: error.kind().to_string(),
                        message: error.to_string(),
                    });
                }
            }
        }

        if needs_rewrite && self.options.rewrite && plan.rewrite.enabled {
            match rewrite_html(plan, &fs) {
                Ok(report) => on_event(WatchEvent::RewriteComplete {
                    substitutions: report.substitutions(),
                }),
                Err(error) => on_event(WatchEvent::Error {
                    message: error.to_string(),
                }),
            }
        }
    }
}
