//! Configuration module for assetline
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ASSETLINE_*)
//! 3. Project config (assetline.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::load_for_project;
pub use types::{
    AssetsConfig, ColorMode, Config, DependenciesConfig, HtmlConfig, OutputConfig, RewriteConfig,
    ScriptsConfig, StylesConfig, UiConfig, WatchConfig,
};

/// Project configuration file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = "assetline.toml";
