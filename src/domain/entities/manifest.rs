//! Dependency manifest entity
//!
//! An ordered list of third-party library files to publish, relative to the
//! raw library root (usually `node_modules`). Entries flagged `inject` are
//! also referenced from the HTML script block, in manifest order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{AssetlineError, AssetlineResult};

/// One library file (or glob) to copy into the published root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the library root
    pub path: String,
    /// Inject a `<script>` reference for this entry
    #[serde(default)]
    pub inject: bool,
}

impl ManifestEntry {
    pub fn copy(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            inject: false,
        }
    }

    pub fn script(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            inject: true,
        }
    }

    fn normalized(&self) -> String {
        self.path
            .trim()
            .trim_start_matches("./")
            .split('/')
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Ordered dependency manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest, enforcing entry invariants.
    pub fn new(entries: Vec<ManifestEntry>) -> AssetlineResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            let normalized = entry.normalized();
            if normalized.is_empty() {
                return Err(AssetlineError::InvalidManifest {
                    message: "entry path is empty".to_string(),
                });
            }
            if normalized.split('/').any(|p| p == "..") {
                return Err(AssetlineError::InvalidManifest {
                    message: format!("entry '{}' leaves the library root", entry.path),
                });
            }
            if entry.inject && normalized.contains(['*', '?', '[', '{']) {
                return Err(AssetlineError::InvalidManifest {
                    message: format!(
                        "injected entry '{}' must name a single file, not a glob",
                        entry.path
                    ),
                });
            }
            if !seen.insert(normalized) {
                return Err(AssetlineError::InvalidManifest {
                    message: format!("duplicate entry '{}'", entry.path),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The manifest shipped by default: the original project's library set.
    pub fn default_libraries() -> Self {
        Self {
            entries: vec![
                ManifestEntry::script("jquery/dist/jquery.min.js"),
                ManifestEntry::script("jquery-ui/dist/jquery-ui.min.js"),
                ManifestEntry::copy("jquery-ui-css/jquery-ui.min.css"),
                ManifestEntry::script("slick-carousel/slick/slick.min.js"),
                ManifestEntry::copy("slick-carousel/slick/slick.css"),
                ManifestEntry::copy("slick-carousel/slick/slick-theme.css"),
                ManifestEntry::copy("slick-carousel/slick/fonts/**/*"),
                ManifestEntry::copy("slick-carousel/slick/ajax-loader.gif"),
                ManifestEntry::script("magnific-popup/dist/jquery.magnific-popup.min.js"),
                ManifestEntry::copy("magnific-popup/dist/magnific-popup.css"),
                ManifestEntry::copy("animate.css/animate.min.css"),
                ManifestEntry::copy("hover.css/css/hover-min.css"),
                ManifestEntry::script("wowjs/dist/wow.min.js"),
            ],
        }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy patterns, relative to the library root
    pub fn patterns(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(ManifestEntry::normalized)
    }

    /// Library-relative paths of injected entries, in manifest order
    pub fn injected(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .filter(|e| e.inject)
            .map(ManifestEntry::normalized)
    }

    /// Published references (`<publish>/<path>`) for injected entries
    pub fn published_references(&self, publish_root: &str) -> Vec<String> {
        let root = publish_root.trim_end_matches('/');
        self.injected()
            .map(|path| {
                if root.is_empty() {
                    path
                } else {
                    format!("{root}/{path}")
                }
            })
            .collect()
    }
}
