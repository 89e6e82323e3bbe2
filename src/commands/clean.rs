use anyhow::{Context, Result};
use assetline::{CleanUseCase, LocalFs};

use super::Session;
use crate::ui::json;
use crate::ui::views::clean::{render_clean_header, render_clean_result};

pub fn cmd_clean(session: &Session) -> Result<()> {
    let ui = session.ui;
    let plan = &session.plan;

    if !ui.json {
        print!(
            "{}",
            render_clean_header(&plan.project_relative(&plan.out_dir), ui.color, ui.unicode)
        );
    }

    let result = CleanUseCase::new(LocalFs::new())
        .execute(plan)
        .with_context(|| format!("failed to clean {}", plan.out_dir.display()))?;

    if ui.json {
        let _ = json::emit(serde_json::json!({
            "event": "cleaned",
            "command": "clean",
            "dir": result.out_dir.display().to_string(),
            "removed": result.removed,
        }));
    } else {
        print!("{}", render_clean_result(&result, ui.color, ui.unicode));
    }
    Ok(())
}
