pub mod build;
pub mod clean;
pub mod run;
pub mod watch;

use std::sync::Arc;

use anyhow::{Context, Result};
use assetline::config::load_for_project;
use assetline::{BuildPlan, ConfigWarning};

use crate::cli::Cli;
use crate::ui::context::UiContext;

/// State shared by every command: the resolved plan and output settings
pub struct Session {
    pub plan: Arc<BuildPlan>,
    pub ui: UiContext,
}

impl Session {
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config, warnings) = load_for_project(&cli.project, cli.config.as_deref())
            .with_context(|| {
                format!("failed to load configuration for {}", cli.project.display())
            })?;
        let ui = UiContext::new(cli.json, cli.color, &config);
        report_config_warnings(&warnings, &ui);

        let plan = BuildPlan::new(&cli.project, &config)
            .with_context(|| format!("failed to resolve project {}", cli.project.display()))?;
        tracing::debug!(
            project = %plan.project_root.display(),
            out_dir = %plan.out_dir.display(),
            "resolved build plan"
        );

        Ok(Self {
            plan: Arc::new(plan),
            ui,
        })
    }
}

fn report_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    if warnings.is_empty() {
        return;
    }
    if ui.json {
        for w in warnings {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "config_warning",
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }));
        }
    } else {
        eprint!(
            "{}",
            crate::ui::views::render_config_warnings(warnings, ui.color, ui.unicode)
        );
    }
}
