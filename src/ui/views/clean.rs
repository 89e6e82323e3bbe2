//! Clean command UI views

use assetline::CleanResult;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

/// Render the clean command header
pub fn render_clean_header(out_dir: &str, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Clean, "assetline clean");
    header.add("Output", out_dir);
    header.render(supports_color, supports_unicode)
}

/// Render the clean result summary
pub fn render_clean_result(
    result: &CleanResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if result.removed {
        ResultSummary::success("Clean Complete")
    } else {
        ResultSummary::success("Nothing to Clean")
    };
    if !result.removed {
        summary.with_next_step("Run 'assetline build' to produce output");
    }
    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_output_dir_suggests_build() {
        let result = CleanResult {
            out_dir: PathBuf::from("dist"),
            removed: false,
        };
        let rendered = render_clean_result(&result, false, false);
        assert!(rendered.contains("[OK] Nothing to Clean"));
        assert!(rendered.contains("assetline build"));
    }
}
