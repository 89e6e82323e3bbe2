//! `scripts` task: minify each script to `<stem>.min.js`

use std::path::PathBuf;

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::domain::services::minify_script;
use crate::domain::value_objects::TaskKind;
use crate::error::{AssetlineError, AssetlineResult};
use crate::infrastructure::fs::resolve_sources;

pub(super) fn run<F: FileSystem + ?Sized>(plan: &BuildPlan, fs: &F) -> AssetlineResult<Vec<PathBuf>> {
    let sources = resolve_sources(TaskKind::Scripts.name(), &plan.scripts.patterns, false)?;
    let mut written = Vec::with_capacity(sources.len());
    for source in sources {
        let code = fs.read(&source.path)?;
        let minified = minify_script(&code).map_err(|message| AssetlineError::Script {
            file: source.path.clone(),
            message,
        })?;

        let target = plan.out_dir.join(plan.script_output(&source.relative));
        fs.write(&target, minified.as_bytes())?;
        written.push(target);
    }
    Ok(written)
}
