//! Task kind value object - names the transform tasks of a build

use serde::{Deserialize, Serialize};

/// A transform task in the build pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    /// Compile, concatenate and minify stylesheets
    Styles,
    /// Minify scripts
    Scripts,
    /// Minify the HTML template
    Html,
    /// Copy static assets
    Assets,
    /// Copy third-party library files
    Dependencies,
}

impl TaskKind {
    /// Every task, in the order they are scheduled
    pub const ALL: [TaskKind; 5] = [
        TaskKind::Styles,
        TaskKind::Html,
        TaskKind::Assets,
        TaskKind::Dependencies,
        TaskKind::Scripts,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Styles => "styles",
            TaskKind::Scripts => "scripts",
            TaskKind::Html => "html",
            TaskKind::Assets => "assets",
            TaskKind::Dependencies => "dependencies",
        }
    }

    /// Whether a re-run of this task leaves the rewritten HTML stale
    pub fn affects_rewrite(&self) -> bool {
        matches!(self, TaskKind::Html | TaskKind::Dependencies)
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
