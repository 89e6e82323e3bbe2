//! Watch registrations
//!
//! Maps input patterns to the task that owns them, and remembers the last
//! seen content of each input.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::plan::BuildPlan;
use crate::domain::value_objects::{ContentHash, SourcePattern, TaskKind};
use crate::error::AssetlineResult;
use crate::infrastructure::fs::resolve_sources;

/// `{input patterns → task}` table
#[derive(Debug, Clone, Default)]
pub struct WatchRegistry {
    entries: Vec<(SourcePattern, TaskKind)>,
    out_dir: PathBuf,
}

impl WatchRegistry {
    /// Registrations for `plan`: styles, html, dependencies and scripts.
    pub fn from_plan(plan: &BuildPlan) -> AssetlineResult<Self> {
        let mut entries = Vec::new();
        for task in [
            TaskKind::Styles,
            TaskKind::Html,
            TaskKind::Dependencies,
            TaskKind::Scripts,
        ] {
            for pattern in plan.watch_patterns(task)? {
                entries.push((pattern, task));
            }
        }
        Ok(Self {
            entries,
            out_dir: plan.out_dir.clone(),
        })
    }

    /// Tasks owning `path`, in pipeline order, without duplicates.
    ///
    /// Anything under the output directory belongs to no task.
    pub fn tasks_for(&self, path: &Path) -> Vec<TaskKind> {
        if path.starts_with(&self.out_dir) {
            return Vec::new();
        }
        let mut tasks: Vec<TaskKind> = Vec::new();
        for (pattern, task) in &self.entries {
            if !tasks.contains(task) && pattern.matches(path) {
                tasks.push(*task);
            }
        }
        tasks.sort_by_key(|t| TaskKind::ALL.iter().position(|k| k == t));
        tasks
    }

    /// Human-readable registrations, e.g. `src/styles/*.scss → styles`
    pub fn describe(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(pattern, task)| format!("{pattern} → {task}"))
            .collect()
    }

    pub fn patterns(&self) -> impl Iterator<Item = (&SourcePattern, TaskKind)> {
        self.entries.iter().map(|(p, t)| (p, *t))
    }
}

/// Last known content hash per input file
#[derive(Debug, Default)]
pub struct ContentTracker {
    hashes: HashMap<PathBuf, ContentHash>,
}

impl ContentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current content of every file matched by `registry`,
    /// skipping library registrations.
    pub fn prime(&mut self, registry: &WatchRegistry) {
        for (pattern, task) in registry.patterns() {
            if task == TaskKind::Dependencies {
                continue;
            }
            let files = resolve_sources(task.name(), std::slice::from_ref(pattern), true)
                .unwrap_or_default();
            for file in files {
                if let Ok(bytes) = std::fs::read(&file.path) {
                    self.hashes.insert(file.path, ContentHash::from_bytes(&bytes));
                }
            }
        }
    }

    /// Whether `path` differs from the last recorded content.
    ///
    /// Records the new state. An unreadable (deleted) file always counts as
    /// changed.
    pub fn observe(&mut self, path: &Path) -> bool {
        match std::fs::read(path) {
            Ok(bytes) => {
                let hash = ContentHash::from_bytes(&bytes);
                let changed = self.hashes.get(path) != Some(&hash);
                self.hashes.insert(path.to_path_buf(), hash);
                changed
            }
            Err(_) => {
                self.hashes.remove(path);
                true
            }
        }
    }
}
