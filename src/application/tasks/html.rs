//! `html` task: collapse whitespace in the template

use std::path::PathBuf;

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::domain::services::collapse_whitespace;
use crate::error::{AssetlineError, AssetlineResult};

pub(super) fn run<F: FileSystem + ?Sized>(plan: &BuildPlan, fs: &F) -> AssetlineResult<Vec<PathBuf>> {
    let Some(template) = plan.html.template.literal_path() else {
        return Err(AssetlineError::InvalidPattern {
            pattern: plan.html.template.raw().to_string(),
            message: "the HTML template must be a single file".to_string(),
        });
    };
    if !fs.exists(&template) {
        return Err(AssetlineError::SourceNotFound { path: template });
    }

    let document = fs.read(&template)?;
    let minified = collapse_whitespace(&document).map_err(|message| AssetlineError::Html {
        file: template.clone(),
        message,
    })?;

    let target = plan.html_output();
    fs.write(&target, minified.as_bytes())?;
    Ok(vec![target])
}
