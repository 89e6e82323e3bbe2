//! Build event types for NDJSON output

use crate::domain::value_objects::TaskKind;

/// Events emitted while a build runs
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    /// Output directory removed
    Cleaned { dir: String, removed: bool },
    /// Transform task started
    TaskStarted { task: TaskKind },
    /// Transform task finished
    TaskComplete {
        task: TaskKind,
        files: usize,
        duration_ms: u64,
    },
    /// Transform task failed
    TaskFailed {
        task: TaskKind,
        kind: String,
        message: String,
    },
    /// HTML document rewritten
    RewriteComplete {
        file: String,
        substitutions: usize,
        warnings: Vec<String>,
    },
    /// Rewrite skipped because a task failed
    RewriteSkipped,
    /// Whole build finished
    BuildComplete {
        success: bool,
        files: usize,
        duration_ms: u64,
    },
}

impl BuildEvent {
    /// Convert to JSON string with "command": "build" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("build"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
