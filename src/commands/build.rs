use std::sync::Arc;

use anyhow::{Context, Result};
use assetline::{BuildOptions, BuildReport, BuildUseCase, LocalFs};

use super::Session;
use crate::ui::json;
use crate::ui::views::build::{render_build_event, render_build_header, render_build_result};

pub async fn cmd_build(session: &Session) -> Result<()> {
    let ui = session.ui;
    if !ui.json {
        print!(
            "{}",
            render_build_header("build", &session.plan, ui.color, ui.unicode)
        );
    }

    let report = run_pipeline(session, &BuildOptions::new()).await?;

    if !ui.json {
        print!("{}", render_build_result(&report, ui.color, ui.unicode));
    }
    Ok(())
}

/// Run `options` against the session plan, streaming events to the terminal.
pub(crate) async fn run_pipeline(session: &Session, options: &BuildOptions) -> Result<BuildReport> {
    let ui = session.ui;
    let use_case = BuildUseCase::new(LocalFs::new());

    use_case
        .execute(Arc::clone(&session.plan), options, |event| {
            if ui.json {
                let _ = json::emit_line(&event.to_json());
            } else {
                print!("{}", render_build_event(&event, ui.color, ui.unicode));
            }
        })
        .await
        .context("build failed")
}
