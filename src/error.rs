//! Error types for assetline
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for assetline operations
pub type AssetlineResult<T> = Result<T, AssetlineError>;

/// Main error type for assetline operations
#[derive(Error, Debug)]
pub enum AssetlineError {
    /// A literal (non-glob) source path does not exist
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// None of a task's patterns matched a file
    #[error("task '{task}' matched no files (patterns: {patterns})")]
    NoMatches { task: String, patterns: String },

    /// Invalid glob pattern in configuration
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Dependency manifest violates an invariant
    #[error("invalid dependency manifest: {message}")]
    InvalidManifest { message: String },

    /// Stylesheet failed to compile or minify
    #[error("stylesheet error in {file}: {message}")]
    Stylesheet { file: PathBuf, message: String },

    /// Script failed to minify
    #[error("script error in {file}: {message}")]
    Script { file: PathBuf, message: String },

    /// HTML template could not be tokenized
    #[error("HTML error in {file}: {message}")]
    Html { file: PathBuf, message: String },

    /// A required rewrite marker was not present in the document
    #[error("marker '{marker}' not found in {file}")]
    MissingMarker { marker: String, file: PathBuf },

    /// A raw library reference survived the rewrite
    #[error("unrewritten reference '{reference}' remains in {file}")]
    UnrewrittenReference { reference: String, file: PathBuf },

    /// An injected manifest reference has no copied file behind it
    #[error("published file missing for reference '{reference}' (expected {path})")]
    MissingPublishedFile { reference: String, path: PathBuf },

    /// Path escapes project boundary
    #[error("path '{path}' escapes project boundary '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// A transform task panicked or was cancelled
    #[error("task '{task}' did not complete: {message}")]
    TaskAborted { task: String, message: String },

    /// File watcher failure
    #[error("watch error: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetlineError {
    /// Short machine-friendly identifier used in NDJSON output
    pub fn kind(&self) -> &'static str {
        match self {
            AssetlineError::SourceNotFound { .. } => "source_not_found",
            AssetlineError::NoMatches { .. } => "no_matches",
            AssetlineError::InvalidPattern { .. } => "invalid_pattern",
            AssetlineError::Config { .. } => "config",
            AssetlineError::InvalidManifest { .. } => "invalid_manifest",
            AssetlineError::Stylesheet { .. } => "stylesheet",
            AssetlineError::Script { .. } => "script",
            AssetlineError::Html { .. } => "html",
            AssetlineError::MissingMarker { .. } => "missing_marker",
            AssetlineError::UnrewrittenReference { .. } => "unrewritten_reference",
            AssetlineError::MissingPublishedFile { .. } => "missing_published_file",
            AssetlineError::PathEscape { .. } => "path_escape",
            AssetlineError::TaskAborted { .. } => "task_aborted",
            AssetlineError::Watch(_) => "watch",
            AssetlineError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_missing_marker() {
        let err = AssetlineError::MissingMarker {
            marker: "<!-- build:js -->".to_string(),
            file: PathBuf::from("dist/index.html"),
        };
        assert_eq!(
            err.to_string(),
            "marker '<!-- build:js -->' not found in dist/index.html"
        );
    }

    #[test]
    fn test_error_display_no_matches() {
        let err = AssetlineError::NoMatches {
            task: "styles".to_string(),
            patterns: "src/styles/*.scss".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "task 'styles' matched no files (patterns: src/styles/*.scss)"
        );
        assert_eq!(err.kind(), "no_matches");
    }
}
