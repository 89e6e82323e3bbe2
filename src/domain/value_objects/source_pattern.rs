//! Source pattern value object
//!
//! A project-relative glob such as `src/styles/*.scss` or a literal path such
//! as `index.html`. Matching uses the `ignore` crate's override globs, always
//! anchored at the project root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use ignore::overrides::{Override, OverrideBuilder};

use crate::error::{AssetlineError, AssetlineResult};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// A single input pattern, relative to the project root.
#[derive(Clone)]
pub struct SourcePattern {
    root: PathBuf,
    raw: String,
    normalized: String,
    base: PathBuf,
    literal: bool,
    matcher: Override,
}

impl SourcePattern {
    /// Parse a pattern relative to `root` (the project directory).
    pub fn new(root: &Path, raw: &str) -> AssetlineResult<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(AssetlineError::InvalidPattern {
                pattern: raw.to_string(),
                message: "pattern is empty".to_string(),
            });
        }
        if Path::new(&normalized)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(AssetlineError::InvalidPattern {
                pattern: raw.to_string(),
                message: "pattern must stay inside the project".to_string(),
            });
        }

        let literal = !normalized.contains(GLOB_META);
        let base = glob_base(&normalized, literal);

        let mut builder = OverrideBuilder::new(root);
        builder
            .add(&format!("/{normalized}"))
            .map_err(|e| AssetlineError::InvalidPattern {
                pattern: raw.to_string(),
                message: e.to_string(),
            })?;
        let matcher = builder.build().map_err(|e| AssetlineError::InvalidPattern {
            pattern: raw.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            raw: raw.to_string(),
            normalized,
            base,
            literal,
            matcher,
        })
    }

    /// The pattern as written in configuration
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The pattern with `./` prefixes and duplicate separators removed
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Leading directory portion that contains no glob characters.
    ///
    /// For a literal path this is its parent directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Absolute directory to search: the root joined with the base
    pub fn search_dir(&self) -> PathBuf {
        self.root.join(&self.base)
    }

    /// Absolute path of a literal pattern
    pub fn literal_path(&self) -> Option<PathBuf> {
        self.literal.then(|| self.root.join(&self.normalized))
    }

    /// Check whether an absolute path under the project root matches.
    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.matched(path, false).is_whitelist()
    }
}

impl fmt::Debug for SourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourcePattern")
            .field("raw", &self.raw)
            .field("base", &self.base)
            .field("literal", &self.literal)
            .finish()
    }
}

impl fmt::Display for SourcePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Strip `./`, leading `/` and collapse repeated separators.
fn normalize(raw: &str) -> String {
    raw.trim()
        .replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn glob_base(normalized: &str, literal: bool) -> PathBuf {
    let parts: Vec<&str> = normalized.split('/').collect();
    let keep = if literal {
        parts.len().saturating_sub(1)
    } else {
        parts
            .iter()
            .position(|part| part.contains(GLOB_META))
            .unwrap_or(parts.len())
    };
    parts[..keep].iter().collect()
}

/// Join patterns for display in error messages
pub fn describe_patterns(patterns: &[SourcePattern]) -> String {
    patterns
        .iter()
        .map(SourcePattern::raw)
        .collect::<Vec<_>>()
        .join(", ")
}
