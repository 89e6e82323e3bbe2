//! `styles` task: compile, concatenate, minify

use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use crate::application::plan::BuildPlan;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{describe_patterns, TaskKind};
use crate::error::{AssetlineError, AssetlineResult};
use crate::infrastructure::fs::{resolve_sources, SourceFile};

pub(super) fn run<F: FileSystem + ?Sized>(plan: &BuildPlan, fs: &F) -> AssetlineResult<Vec<PathBuf>> {
    let sources: Vec<SourceFile> = resolve_sources(TaskKind::Styles.name(), &plan.styles.patterns, false)?
        .into_iter()
        .filter(|s| !s.file_name().starts_with('_'))
        .collect();
    if sources.is_empty() {
        return Err(AssetlineError::NoMatches {
            task: TaskKind::Styles.name().to_string(),
            patterns: describe_patterns(&plan.styles.patterns),
        });
    }

    let mut compiled = Vec::with_capacity(sources.len());
    for source in &sources {
        tracing::trace!(file = %source.path.display(), "compiling stylesheet");
        compiled.push(compile(&source.path, &plan.styles.load_paths)?);
    }

    let target = plan.styles_dir().join(&plan.styles.bundle);
    let bundle = concat(&compiled);
    let minified = minify(&bundle, &target)?;

    fs.write(&target, minified.as_bytes())?;
    Ok(vec![target])
}

fn compile(path: &Path, load_paths: &[PathBuf]) -> AssetlineResult<String> {
    let options = grass::Options::default()
        .style(grass::OutputStyle::Expanded)
        .load_paths(load_paths);
    grass::from_path(path, &options).map_err(|e| AssetlineError::Stylesheet {
        file: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Concatenate compiled sheets, hoisting `@import` rules to the top.
///
/// `@charset` is dropped; the bundle is written as UTF-8.
fn concat(sheets: &[String]) -> String {
    let mut imports: Vec<String> = Vec::new();
    let mut bodies = Vec::with_capacity(sheets.len());

    for sheet in sheets {
        let mut rest = sheet.trim_start_matches('\u{feff}').trim_start();
        loop {
            let is_import = rest.starts_with("@import");
            if !is_import && !rest.starts_with("@charset") {
                break;
            }
            let Some(end) = rest.find(';') else {
                break;
            };
            if is_import {
                let rule = rest[..=end].to_string();
                if !imports.contains(&rule) {
                    imports.push(rule);
                }
            }
            rest = rest[end + 1..].trim_start();
        }
        if !rest.trim().is_empty() {
            bodies.push(rest.trim_end().to_string());
        }
    }

    let mut out = imports.join("\n");
    for body in bodies {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&body);
    }
    out
}

fn minify(css: &str, target: &Path) -> AssetlineResult<String> {
    let err = |message: String| AssetlineError::Stylesheet {
        file: target.to_path_buf(),
        message,
    };

    let mut sheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: target.display().to_string(),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| err(e.to_string()))?;
    sheet
        .minify(MinifyOptions::default())
        .map_err(|e| err(e.to_string()))?;
    let output = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| err(e.to_string()))?;
    Ok(output.code)
}
