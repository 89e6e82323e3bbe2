//! `assets` task: copy static files, preserving paths under their glob base

use std::path::PathBuf;

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::TaskKind;
use crate::error::AssetlineResult;
use crate::infrastructure::fs::resolve_sources;

pub(super) fn run<F: FileSystem + ?Sized>(plan: &BuildPlan, fs: &F) -> AssetlineResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for pattern in &plan.assets.patterns {
        // Each pattern keeps its own base (`fonts/**/*` lands in `<out>/fonts`).
        let sources = resolve_sources(TaskKind::Assets.name(), std::slice::from_ref(pattern), true)?;
        for source in sources {
            let target = plan.out_dir.join(pattern.base()).join(&source.relative);
            fs.copy(&source.path, &target)?;
            written.push(target);
        }
    }

    if written.is_empty() && !plan.assets.allow_empty {
        return Err(crate::error::AssetlineError::NoMatches {
            task: TaskKind::Assets.name().to_string(),
            patterns: crate::domain::value_objects::describe_patterns(&plan.assets.patterns),
        });
    }
    Ok(written)
}
