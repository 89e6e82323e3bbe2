//! assetline - front-end asset pipeline
//!
//! Compiles stylesheets, minifies scripts and HTML, copies static assets and
//! third-party library files into one output directory, then rewrites the
//! generated HTML so every reference points at the produced files.
//! A watch mode re-runs individual tasks when their inputs change.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    BuildEvent, BuildOptions, BuildPlan, BuildReport, BuildUseCase, CleanResult, CleanUseCase,
    WatchEvent, WatchOptions, WatchUseCase,
};
pub use config::{ColorMode, Config};
pub use domain::value_objects::{ConfigWarning, Layout, TaskKind};
pub use error::{AssetlineError, AssetlineResult};
pub use infrastructure::LocalFs;
