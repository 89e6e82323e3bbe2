use anyhow::Result;
use assetline::BuildOptions;

use super::build::run_pipeline;
use super::Session;
use crate::cli::Step;
use crate::ui::views::build::{render_build_header, render_build_result};

pub async fn cmd_run(session: &Session, step: Step) -> Result<()> {
    let ui = session.ui;
    let (title, options) = match step.task() {
        Some(task) => (format!("run {task}"), BuildOptions::single(task)),
        None => {
            if !session.plan.rewrite.enabled {
                tracing::warn!("rewrite is disabled in configuration; nothing to do");
            }
            ("run rewrite".to_string(), BuildOptions::rewrite_only())
        }
    };

    if !ui.json {
        print!(
            "{}",
            render_build_header(&title, &session.plan, ui.color, ui.unicode)
        );
    }

    let report = run_pipeline(session, &options).await?;

    if !ui.json {
        print!("{}", render_build_result(&report, ui.color, ui.unicode));
    }
    Ok(())
}
