//! `dependencies` task: publish manifest entries under `<out>/<publish>`

use std::path::PathBuf;

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::TaskKind;
use crate::error::AssetlineResult;
use crate::infrastructure::fs::resolve_sources;

pub(super) fn run<F: FileSystem + ?Sized>(plan: &BuildPlan, fs: &F) -> AssetlineResult<Vec<PathBuf>> {
    let deps = &plan.dependencies;
    if deps.manifest.is_empty() {
        return Ok(Vec::new());
    }

    let publish_dir = plan.publish_dir();
    let mut written = Vec::new();
    for source in resolve_sources(TaskKind::Dependencies.name(), &deps.patterns, false)? {
        // Paths stay relative to the library root, not the entry's glob base.
        let Ok(relative) = source.path.strip_prefix(&deps.library_root) else {
            continue;
        };
        let target = publish_dir.join(relative);
        fs.copy(&source.path, &target)?;
        written.push(target);
    }
    Ok(written)
}
