//! Rewrite step
//!
//! Points the generated HTML document at the produced output. Runs after
//! every transform task has finished.

use std::path::PathBuf;

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::domain::services::{AppliedRule, Rewriter};
use crate::domain::value_objects::TaskKind;
use crate::error::{AssetlineError, AssetlineResult};
use crate::infrastructure::fs::resolve_sources;

/// Result of rewriting the generated document
#[derive(Debug, Clone, Default)]
pub struct RewriteReport {
    pub document: PathBuf,
    pub applied: Vec<AppliedRule>,
    /// Problems tolerated because strict mode is off
    pub warnings: Vec<String>,
}

impl RewriteReport {
    pub fn substitutions(&self) -> usize {
        self.applied.iter().map(|a| a.count).sum()
    }
}

/// Build the rule table for `plan`.
///
/// Rules run in this order: entry stylesheet, scripts (main script first),
/// library prefixes, then the script block.
pub fn rewriter_for(plan: &BuildPlan) -> AssetlineResult<Rewriter> {
    let raw = &plan.dependencies.raw_root;
    let publish = &plan.dependencies.publish;

    let mut rewriter = Rewriter::new().literal(
        format!("href=\"{}\"", plan.styles.entry),
        format!("href=\"{}\"", plan.styles_reference()),
        true,
    );

    rewriter = rewriter.literal(
        format!("src=\"{}\"", plan.scripts.entry),
        format!("src=\"{}\"", plan.entry_script_reference()),
        true,
    );
    let scripts = resolve_sources(TaskKind::Scripts.name(), &plan.scripts.patterns, true)?;
    for script in scripts {
        let relative = plan.project_relative(&script.path);
        if relative == plan.scripts.entry {
            continue;
        }
        rewriter = rewriter.literal(
            format!("src=\"{relative}\""),
            format!("src=\"{}\"", plan.script_reference(&script.relative)),
            false,
        );
    }

    let mut references = plan.dependencies.manifest.published_references(publish);
    references.push(plan.entry_script_reference());

    Ok(rewriter
        .literal(format!("href=\"{raw}/"), format!("href=\"{publish}/"), false)
        .literal(format!("src=\"{raw}/"), format!("src=\"{publish}/"), false)
        .script_block(plan.rewrite.block.clone(), references, true)
        .forbid(format!("=\"{raw}/"))
        .forbid(format!("='{raw}/")))
}

/// Rewrite `<out>/<template>` in place.
///
/// In strict mode the first problem is returned as an error and the document
/// is left as the `html` task wrote it.
pub fn rewrite_html<F: FileSystem + ?Sized>(plan: &BuildPlan, fs: &F) -> AssetlineResult<RewriteReport> {
    let target = plan.html_output();
    if !fs.exists(&target) {
        return Err(AssetlineError::SourceNotFound { path: target });
    }
    let document = fs.read(&target)?;
    let outcome = rewriter_for(plan)?.apply(&document);

    let mut problems: Vec<AssetlineError> = Vec::new();
    for marker in &outcome.missing {
        problems.push(AssetlineError::MissingMarker {
            marker: marker.clone(),
            file: target.clone(),
        });
    }
    for reference in &outcome.unrewritten {
        problems.push(AssetlineError::UnrewrittenReference {
            reference: reference.clone(),
            file: target.clone(),
        });
    }
    for reference in plan
        .dependencies
        .manifest
        .published_references(&plan.dependencies.publish)
    {
        let path = plan.out_dir.join(&reference);
        if !fs.exists(&path) {
            problems.push(AssetlineError::MissingPublishedFile { reference, path });
        }
    }

    let mut warnings = Vec::new();
    if plan.rewrite.strict {
        if let Some(first) = problems.into_iter().next() {
            return Err(first);
        }
    } else {
        for problem in problems {
            tracing::warn!(kind = problem.kind(), "{problem}");
            warnings.push(problem.to_string());
        }
    }

    fs.write(&target, outcome.document.as_bytes())?;
    tracing::debug!(
        file = %target.display(),
        substitutions = outcome.substitutions(),
        "rewrote document"
    );

    Ok(RewriteReport {
        document: target,
        applied: outcome.applied,
        warnings,
    })
}
