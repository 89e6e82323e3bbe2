use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use assetline::{BuildOptions, WatchEvent, WatchOptions, WatchUseCase};

use super::build::run_pipeline;
use super::Session;
use crate::ui::json;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

pub async fn cmd_watch(session: Session, initial: bool) -> Result<()> {
    let ui = session.ui;

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    if !ui.json {
        print!(
            "{}",
            render_watch_header(
                &session.plan.project_root.display().to_string(),
                ui.color,
                ui.unicode
            )
        );
    }

    if initial {
        // A failing initial build is reported like any other task failure.
        if let Err(e) = run_pipeline(&session, &BuildOptions::new()).await {
            tracing::error!(error = %format!("{e:#}"), "initial build failed");
        }
    }

    let use_case = WatchUseCase::new(WatchOptions::new(Arc::clone(&session.plan)))
        .context("failed to set up watch patterns")?;

    let outcome = tokio::task::spawn_blocking(move || {
        use_case.start(running, move |event| {
            if ui.json {
                let _ = json::emit_line(&event.to_json());
                return;
            }
            let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
            let rendered = render_watch_event(&timestamp, &event, ui.color, ui.unicode);
            match event {
                WatchEvent::Error { .. } | WatchEvent::TaskFailed { .. } => eprint!("{rendered}"),
                _ => print!("{rendered}"),
            }
        })
    })
    .await
    .context("watch loop stopped unexpectedly")?;

    outcome.context("watch failed")?;
    Ok(())
}
