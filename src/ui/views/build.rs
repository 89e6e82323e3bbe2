//! Build and run command UI views

use assetline::{BuildEvent, BuildPlan, BuildReport};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render the command header
pub fn render_build_header(
    title: &str,
    plan: &BuildPlan,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Build, format!("assetline {title}"));
    header.add("Project", plan.project_root.display().to_string());
    header.add("Output", plan.project_relative(&plan.out_dir));
    header.add("Layout", plan.layout.to_string());
    header.render(supports_color, supports_unicode)
}

/// Render one progress line; events without a line render as ""
pub fn render_build_event(event: &BuildEvent, supports_color: bool, supports_unicode: bool) -> String {
    match event {
        BuildEvent::Cleaned { dir, removed } => {
            let verb = if *removed { "Cleaned" } else { "Nothing to clean in" };
            format!(
                "{} {} {}\n",
                Icon::Clean.colored(supports_color, supports_unicode),
                verb,
                dir
            )
        }
        BuildEvent::TaskStarted { .. } | BuildEvent::BuildComplete { .. } => String::new(),
        BuildEvent::TaskComplete {
            task,
            files,
            duration_ms,
        } => format!(
            "{} {:<13}{} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            task.name(),
            plural(*files, "file"),
            ColoredText::dim(format!("({duration_ms}ms)")).render(supports_color)
        ),
        BuildEvent::TaskFailed { task, message, .. } => format!(
            "{} {:<13}{}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            task.name(),
            ColoredText::error(message.as_str()).render(supports_color)
        ),
        BuildEvent::RewriteComplete {
            substitutions,
            warnings,
            ..
        } => {
            let icon = if warnings.is_empty() {
                Icon::Success
            } else {
                Icon::Warning
            };
            let mut out = format!(
                "{} {:<13}{}\n",
                icon.colored(supports_color, supports_unicode),
                "rewrite",
                plural(*substitutions, "substitution")
            );
            for warning in warnings {
                out.push_str(&format!(
                    "  {} {}\n",
                    Icon::Arrow.colored(supports_color, supports_unicode),
                    ColoredText::warning(warning.as_str()).render(supports_color)
                ));
            }
            out
        }
        BuildEvent::RewriteSkipped => format!(
            "{} {:<13}{}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            "rewrite",
            ColoredText::dim("skipped").render(supports_color)
        ),
    }
}

/// Render the summary of a finished build
pub fn render_build_result(
    report: &BuildReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let warnings = report
        .rewrite
        .as_ref()
        .map(|r| r.warnings.as_slice())
        .unwrap_or_default();

    let mut summary = if warnings.is_empty() {
        ResultSummary::success("Build Complete")
    } else {
        ResultSummary::partial("Build Complete")
    };
    summary.add_stat("files written", report.files_written());
    if let Some(rewrite) = &report.rewrite {
        summary.add_stat("references rewritten", rewrite.substitutions());
    }
    if !warnings.is_empty() {
        for warning in warnings {
            summary.add_warning(warning.as_str());
        }
        summary.with_next_step("Set rewrite.strict = true to fail on rewrite gaps");
    }
    summary.render(supports_color, supports_unicode)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
