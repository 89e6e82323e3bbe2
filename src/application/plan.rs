//! Build plan
//!
//! The resolved, immutable view of a [`Config`] for one project: absolute
//! paths, compiled source patterns and output locations for every task.
//! Built once per invocation and shared read-only by all tasks.

use std::path::{Component, Path, PathBuf};

use crate::config::{Config, WatchConfig};
use crate::domain::entities::Manifest;
use crate::domain::value_objects::{Layout, SourcePattern, TaskKind};
use crate::error::{AssetlineError, AssetlineResult};

/// Stylesheet task plan
#[derive(Debug, Clone)]
pub struct StylesPlan {
    pub patterns: Vec<SourcePattern>,
    pub load_paths: Vec<PathBuf>,
    /// Output directory, relative to the output root
    pub out_subdir: PathBuf,
    /// Minified bundle file name (`styles.min.css`)
    pub bundle: String,
    /// Template reference to the entry stylesheet
    pub entry: String,
}

/// Script task plan
#[derive(Debug, Clone)]
pub struct ScriptsPlan {
    pub patterns: Vec<SourcePattern>,
    pub out_subdir: PathBuf,
    /// Project-relative path of the main script
    pub entry: String,
}

/// HTML task plan
#[derive(Debug, Clone)]
pub struct HtmlPlan {
    pub template: SourcePattern,
    /// Output file name under the output root
    pub file_name: String,
}

/// Static asset task plan
#[derive(Debug, Clone)]
pub struct AssetsPlan {
    pub patterns: Vec<SourcePattern>,
    pub allow_empty: bool,
}

/// Library copy plan
#[derive(Debug, Clone)]
pub struct DependenciesPlan {
    /// Absolute raw library root
    pub library_root: PathBuf,
    /// Library root as written in templates (`node_modules`)
    pub raw_root: String,
    /// Published root under the output directory (`libs`)
    pub publish: String,
    pub manifest: Manifest,
    /// One pattern per manifest entry, relative to the library root
    pub patterns: Vec<SourcePattern>,
}

/// Rewrite step plan
#[derive(Debug, Clone)]
pub struct RewritePlan {
    pub enabled: bool,
    pub block: String,
    pub strict: bool,
}

/// Resolved configuration for one build
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub project_root: PathBuf,
    pub out_dir: PathBuf,
    pub layout: Layout,
    pub styles: StylesPlan,
    pub scripts: ScriptsPlan,
    pub html: HtmlPlan,
    pub assets: AssetsPlan,
    pub dependencies: DependenciesPlan,
    pub rewrite: RewritePlan,
    pub watch: WatchConfig,
}

impl BuildPlan {
    /// Resolve `config` against `project_root`.
    pub fn new(project_root: &Path, config: &Config) -> AssetlineResult<Self> {
        let project_root = absolute(project_root)?;
        let out_dir = lexical_clean(&project_root.join(&config.output.dir));
        let layout = config.output.layout;

        let styles_patterns = compile_patterns(&project_root, &config.styles.sources)?;
        let scripts_patterns = compile_patterns(&project_root, &config.scripts.sources)?;

        let template = SourcePattern::new(&project_root, &config.html.template)?;
        let Some(template_path) = template.literal_path() else {
            return Err(AssetlineError::InvalidPattern {
                pattern: config.html.template.clone(),
                message: "the HTML template must be a single file".to_string(),
            });
        };
        let file_name = template_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "index.html".to_string());

        let manifest = config.manifest()?;
        let library_root = project_root.join(&config.dependencies.root);
        let dependency_patterns = manifest
            .patterns()
            .map(|p| SourcePattern::new(&library_root, &p))
            .collect::<AssetlineResult<Vec<_>>>()?;

        Ok(Self {
            out_dir,
            layout,
            styles: StylesPlan {
                out_subdir: layout.output_subdir(first_base(&styles_patterns)),
                patterns: styles_patterns,
                load_paths: config
                    .styles
                    .load_paths
                    .iter()
                    .map(|p| project_root.join(p))
                    .collect(),
                bundle: minified_name(&config.styles.bundle),
                entry: config.styles.entry.clone(),
            },
            scripts: ScriptsPlan {
                out_subdir: layout.output_subdir(first_base(&scripts_patterns)),
                patterns: scripts_patterns,
                entry: slash_path(Path::new(&config.scripts.entry)),
            },
            html: HtmlPlan {
                template,
                file_name,
            },
            assets: AssetsPlan {
                patterns: compile_patterns(&project_root, &config.assets.sources)?,
                allow_empty: config.assets.allow_empty,
            },
            dependencies: DependenciesPlan {
                library_root,
                raw_root: slash_path(Path::new(&config.dependencies.root)),
                publish: slash_path(Path::new(&config.dependencies.publish)),
                manifest,
                patterns: dependency_patterns,
            },
            rewrite: RewritePlan {
                enabled: config.rewrite.enabled,
                block: config.rewrite.block.clone(),
                strict: config.rewrite.strict,
            },
            watch: config.watch.clone(),
            project_root,
        })
    }

    /// Absolute output directory of the stylesheet bundle
    pub fn styles_dir(&self) -> PathBuf {
        self.out_dir.join(&self.styles.out_subdir)
    }

    /// Output-relative reference to the minified bundle
    pub fn styles_reference(&self) -> String {
        join_reference(&self.styles.out_subdir, &self.styles.bundle)
    }

    /// Output-relative path of the minified form of a script.
    ///
    /// `relative` is the script's path below its pattern's base directory,
    /// so subdirectories under the base are kept.
    pub fn script_output(&self, relative: &Path) -> PathBuf {
        let name = relative
            .file_name()
            .map(|n| minified_name(&n.to_string_lossy()))
            .unwrap_or_default();
        match relative.parent() {
            Some(parent) => self.scripts.out_subdir.join(parent).join(name),
            None => self.scripts.out_subdir.join(name),
        }
    }

    /// Output-relative reference to the minified form of a script
    pub fn script_reference(&self, relative: &Path) -> String {
        slash_path(&self.script_output(relative))
    }

    /// Output-relative reference to the main script
    pub fn entry_script_reference(&self) -> String {
        let entry = lexical_clean(&self.project_root.join(&self.scripts.entry));
        let relative = self
            .scripts
            .patterns
            .iter()
            .find_map(|pattern| relative_to_pattern(pattern, &entry))
            .or_else(|| entry.file_name().map(PathBuf::from))
            .unwrap_or_default();
        self.script_reference(&relative)
    }

    /// Generated HTML document
    pub fn html_output(&self) -> PathBuf {
        self.out_dir.join(&self.html.file_name)
    }

    /// Absolute published library directory
    pub fn publish_dir(&self) -> PathBuf {
        self.out_dir.join(&self.dependencies.publish)
    }

    /// Project-relative form of an absolute path, with `/` separators
    pub fn project_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.project_root)
            .map(slash_path)
            .unwrap_or_else(|_| path.display().to_string())
    }

    /// Patterns whose changes re-run `task` in watch mode.
    ///
    /// Assets are not watched.
    pub fn watch_patterns(&self, task: TaskKind) -> AssetlineResult<Vec<SourcePattern>> {
        Ok(match task {
            TaskKind::Styles => self.styles.patterns.clone(),
            TaskKind::Scripts => self.scripts.patterns.clone(),
            TaskKind::Html => vec![self.html.template.clone()],
            TaskKind::Dependencies => vec![SourcePattern::new(
                &self.project_root,
                &format!("{}/**/*", self.dependencies.raw_root),
            )?],
            TaskKind::Assets => Vec::new(),
        })
    }
}

fn absolute(path: &Path) -> AssetlineResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    // Canonicalize when possible so watcher events and walk results agree.
    Ok(joined.canonicalize().unwrap_or_else(|_| lexical_clean(&joined)))
}

pub(crate) fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn compile_patterns(root: &Path, raw: &[String]) -> AssetlineResult<Vec<SourcePattern>> {
    raw.iter().map(|r| SourcePattern::new(root, r)).collect()
}

/// Path of `file` below `pattern`'s base, as source resolution reports it
fn relative_to_pattern(pattern: &SourcePattern, file: &Path) -> Option<PathBuf> {
    if let Some(literal) = pattern.literal_path() {
        return (literal == file)
            .then(|| file.file_name().map(PathBuf::from))
            .flatten();
    }
    if !pattern.matches(file) {
        return None;
    }
    file.strip_prefix(pattern.search_dir())
        .ok()
        .map(Path::to_path_buf)
}

fn first_base(patterns: &[SourcePattern]) -> &Path {
    patterns
        .first()
        .map(SourcePattern::base)
        .unwrap_or_else(|| Path::new(""))
}

/// `styles.css` → `styles.min.css`, `script.js` → `script.min.js`
pub fn minified_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}.min.{ext}"),
        _ => format!("{file_name}.min"),
    }
}

/// Join path components with `/` regardless of platform
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn join_reference(dir: &Path, file_name: &str) -> String {
    let dir = slash_path(dir);
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{dir}/{file_name}")
    }
}
