//! Test environment builder for isolated assetline runs.
//!
//! Provides `TestEnv` - a temporary project directory plus helpers to run
//! the assetline binary against it.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use tempfile::TempDir;

use super::fixtures;

/// Result of running an assetline command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Isolated project directory.
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// A complete sample project
    pub fn sample() -> Self {
        Self::builder().sample_project().build()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run assetline in the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run assetline in the project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute assetline");
        TestResult::from_output(output)
    }

    /// Start assetline without waiting for it (for `watch`)
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start assetline")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("ASSETLINE_NO_COLOR", "1")
            .env_remove("ASSETLINE_OUT_DIR")
            .env_remove("ASSETLINE_LAYOUT")
            .env_remove("ASSETLINE_STRICT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Read an output file
    pub fn read(&self, relative_path: &str) -> String {
        let full_path = self.project_path(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    /// Write a file to the project directory
    pub fn write(&self, relative_path: &str, content: &str) {
        write_file(self.project_root.path(), relative_path, content);
    }

    /// Every file under `relative_dir`, sorted, with its bytes
    pub fn snapshot_dir(&self, relative_dir: &str) -> Vec<(String, Vec<u8>)> {
        let root = self.project_path(relative_dir);
        let mut files = Vec::new();
        collect(&root, &root, &mut files);
        files.sort();
        files
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            out.push((rel, std::fs::read(&path).unwrap()));
        }
    }
}

fn write_file(root: &Path, relative_path: &str, content: &str) {
    let full_path = root.join(relative_path);
    if let Some(parent) = full_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(&full_path, content).expect("Failed to write file");
}

/// Builder for TestEnv with fluent API
#[derive(Default)]
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
    config: Option<String>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template, styles, scripts, assets and every default library file
    pub fn sample_project(mut self) -> Self {
        self = self
            .file("index.html", fixtures::INDEX_HTML)
            .file("src/styles/styles.scss", fixtures::STYLES_SCSS)
            .file("src/styles/_colors.scss", fixtures::COLORS_SCSS)
            .file("src/styles/buttons.scss", fixtures::BUTTONS_SCSS)
            .file("src/scripts/script.js", fixtures::SCRIPT_JS)
            .file("src/scripts/menu.js", fixtures::MENU_JS)
            .file("fonts/roboto/roboto.woff2", "woff2")
            .file("images/logo.svg", "<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
        for lib in fixtures::LIBRARY_FILES {
            self = self.file(&format!("node_modules/{lib}"), &format!("/* {lib} */"));
        }
        self
    }

    pub fn file(mut self, relative_path: &str, content: &str) -> Self {
        self.files
            .push((relative_path.to_string(), content.to_string()));
        self
    }

    /// Write `assetline.toml`
    pub fn config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = tempfile::tempdir().expect("Failed to create temp dir");
        for (path, content) in &self.files {
            write_file(project_root.path(), path, content);
        }
        if let Some(config) = &self.config {
            write_file(project_root.path(), "assetline.toml", config);
        }
        TestEnv {
            project_root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_assetline")),
        }
    }
}
