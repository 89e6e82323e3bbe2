//! Configuration loading

use std::fs;
use std::path::Path;

use crate::domain::value_objects::{ConfigWarning, Layout};
use crate::error::{AssetlineError, AssetlineResult};

use super::types::{ColorMode, Config};

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AssetlineResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AssetlineError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the explicit config file, the project file, or defaults.
///
/// An explicit path must exist; a missing project file falls back to defaults.
pub fn load_for_project(
    project_root: &Path,
    explicit: Option<&Path>,
) -> AssetlineResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => {
            let project_config = project_root.join(super::CONFIG_FILE_NAME);
            if project_config.exists() {
                load_with_warnings(&project_config)?
            } else {
                (Config::default(), Vec::new())
            }
        }
    };
    let config = with_env_overrides(config);
    config.validate()?;
    Ok((config, warnings))
}

/// Apply environment variable overrides (ASSETLINE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(super) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // ASSETLINE_OUT_DIR
    if let Some(dir) = var("ASSETLINE_OUT_DIR") {
        if !dir.trim().is_empty() {
            config.output.dir = dir;
        }
    }

    // ASSETLINE_LAYOUT
    if let Some(layout) = var("ASSETLINE_LAYOUT") {
        if let Some(layout) = Layout::parse(&layout) {
            config.output.layout = layout;
        }
    }

    // ASSETLINE_STRICT
    if let Some(val) = var("ASSETLINE_STRICT") {
        config.rewrite.strict = val.to_lowercase() != "false" && val != "0";
    }

    // ASSETLINE_NO_COLOR
    if var("ASSETLINE_NO_COLOR").is_some() {
        config.ui.color = ColorMode::Never;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "output",
        "dir",
        "layout",
        "styles",
        "sources",
        "bundle",
        "entry",
        "load_paths",
        "scripts",
        "html",
        "template",
        "assets",
        "allow_empty",
        "dependencies",
        "root",
        "publish",
        "entries",
        "path",
        "inject",
        "rewrite",
        "enabled",
        "block",
        "strict",
        "watch",
        "debounce_ms",
        "ui",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
