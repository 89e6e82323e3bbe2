//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Manifest, ManifestEntry};
use crate::domain::value_objects::{ConfigWarning, Layout};
use crate::error::{AssetlineError, AssetlineResult};

use super::loader;

/// Output directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_out_dir")]
    pub dir: String,

    #[serde(default)]
    pub layout: Layout,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_out_dir(),
            layout: Layout::default(),
        }
    }
}

fn default_out_dir() -> String {
    "dist".to_string()
}

/// Stylesheet task configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesConfig {
    #[serde(default = "default_style_sources")]
    pub sources: Vec<String>,

    /// Name of the concatenated stylesheet before the `.min` suffix
    #[serde(default = "default_bundle")]
    pub bundle: String,

    /// Stylesheet path referenced by the HTML template
    #[serde(default = "default_style_entry")]
    pub entry: String,

    /// Extra directories searched by `@use` / `@import`
    #[serde(default)]
    pub load_paths: Vec<String>,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            sources: default_style_sources(),
            bundle: default_bundle(),
            entry: default_style_entry(),
            load_paths: Vec::new(),
        }
    }
}

fn default_style_sources() -> Vec<String> {
    vec!["src/styles/*.scss".to_string()]
}

fn default_bundle() -> String {
    "styles.css".to_string()
}

fn default_style_entry() -> String {
    "src/styles/styles.scss".to_string()
}

/// Script task configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
    #[serde(default = "default_script_sources")]
    pub sources: Vec<String>,

    /// The project's own script, injected after every library
    #[serde(default = "default_script_entry")]
    pub entry: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            sources: default_script_sources(),
            entry: default_script_entry(),
        }
    }
}

fn default_script_sources() -> Vec<String> {
    vec!["src/scripts/*.js".to_string()]
}

fn default_script_entry() -> String {
    "src/scripts/script.js".to_string()
}

/// HTML task configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlConfig {
    #[serde(default = "default_template")]
    pub template: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
        }
    }
}

fn default_template() -> String {
    "index.html".to_string()
}

/// Static asset task configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_asset_sources")]
    pub sources: Vec<String>,

    /// Succeed even when no asset matches
    #[serde(default)]
    pub allow_empty: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            sources: default_asset_sources(),
            allow_empty: false,
        }
    }
}

fn default_asset_sources() -> Vec<String> {
    vec!["fonts/**/*".to_string(), "images/**/*".to_string()]
}

/// Third-party library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependenciesConfig {
    /// Raw library root, as referenced by the template
    #[serde(default = "default_library_root")]
    pub root: String,

    /// Published root under the output directory
    #[serde(default = "default_publish")]
    pub publish: String,

    #[serde(default = "default_entries")]
    pub entries: Vec<ManifestEntry>,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            root: default_library_root(),
            publish: default_publish(),
            entries: default_entries(),
        }
    }
}

fn default_library_root() -> String {
    "node_modules".to_string()
}

fn default_publish() -> String {
    "libs".to_string()
}

fn default_entries() -> Vec<ManifestEntry> {
    Manifest::default_libraries().entries().to_vec()
}

/// Rewrite step configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Name of the `<!-- build:NAME -->` script block
    #[serde(default = "default_block")]
    pub block: String,

    /// Fail when a required marker is missing
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            block: default_block(),
            strict: true,
        }
    }
}

fn default_block() -> String {
    "js".to_string()
}

fn default_true() -> bool {
    true
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Re-run the rewrite step after `html` or `dependencies` re-runs
    #[serde(default)]
    pub rewrite: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            rewrite: false,
        }
    }
}

fn default_debounce_ms() -> u64 {
    200
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub styles: StylesConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub html: HtmlConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub dependencies: DependenciesConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AssetlineResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> AssetlineResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (ASSETLINE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// The validated dependency manifest
    pub fn manifest(&self) -> AssetlineResult<Manifest> {
        Manifest::new(self.dependencies.entries.clone())
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> AssetlineResult<()> {
        let non_empty = [
            ("styles.sources", self.styles.sources.is_empty()),
            ("scripts.sources", self.scripts.sources.is_empty()),
            ("assets.sources", self.assets.sources.is_empty()),
            ("output.dir", self.output.dir.trim().is_empty()),
            ("html.template", self.html.template.trim().is_empty()),
            ("styles.bundle", self.styles.bundle.trim().is_empty()),
            ("dependencies.root", self.dependencies.root.trim().is_empty()),
            ("rewrite.block", self.rewrite.block.trim().is_empty()),
        ];
        if let Some((key, _)) = non_empty.iter().find(|(_, empty)| *empty) {
            return Err(AssetlineError::Config {
                file: Path::new(super::CONFIG_FILE_NAME).to_path_buf(),
                message: format!("'{key}' must not be empty"),
            });
        }
        self.manifest()?;
        Ok(())
    }
}
