//! Output layout value object
//!
//! - `Nested` mirrors the source tree under the output directory
//!   (`dist/src/styles`, `dist/src/scripts`)
//! - `Flat` places compiled styles and scripts directly under the output
//!   directory (`dist/styles`, `dist/scripts`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How compiled styles and scripts are placed under the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Nested,
    Flat,
}

impl Layout {
    /// Output-relative directory for files whose sources live under `source_base`.
    ///
    /// `source_base` is project-relative (e.g. `src/styles`).
    pub fn output_subdir(&self, source_base: &Path) -> PathBuf {
        match self {
            Layout::Nested => source_base.to_path_buf(),
            Layout::Flat => source_base
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "nested" => Some(Layout::Nested),
            "flat" => Some(Layout::Flat),
            _ => None,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Nested => write!(f, "nested"),
            Layout::Flat => write!(f, "flat"),
        }
    }
}
