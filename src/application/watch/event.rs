//! Watch event types and options

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::plan::BuildPlan;
use crate::domain::value_objects::TaskKind;

/// Default debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 200;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub plan: Arc<BuildPlan>,
    /// Quiet period before queued changes are processed
    pub debounce: Duration,
    /// Re-run the rewrite step after `html` or `dependencies`
    pub rewrite: bool,
}

impl WatchOptions {
    /// Options taken from the plan's `[watch]` section
    pub fn new(plan: Arc<BuildPlan>) -> Self {
        let debounce = Duration::from_millis(plan.watch.debounce_ms);
        let rewrite = plan.watch.rewrite;
        Self {
            plan,
            debounce,
            rewrite,
        }
    }

    pub fn with_rewrite(mut self, rewrite: bool) -> Self {
        self.rewrite = rewrite;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        project: String,
        watching: Vec<String>,
    },
    /// File changed
    FileChanged { path: String },
    /// Task re-run started
    TaskStarted { task: TaskKind },
    /// Task re-run finished
    TaskComplete {
        task: TaskKind,
        files: usize,
        duration_ms: u64,
    },
    /// Task re-run failed; watching continues
    TaskFailed {
        task: TaskKind,
        kind: String,
        message: String,
    },
    /// HTML document rewritten
    RewriteComplete { substitutions: usize },
    /// Error occurred
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
    debounce: Duration,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl WatcherState {
    /// Create a new watcher state
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
            debounce,
        }
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if the debounce period has passed and we have pending changes
    pub fn should_run(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.debounce,
            None => false,
        }
    }

    /// Take all pending changes (sorted), resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }
}
