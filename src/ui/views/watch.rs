use assetline::WatchEvent;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_watch_header(project: &str, supports_color: bool, supports_unicode: bool) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "assetline watch");
    header.add("Project", project);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);

    match event {
        WatchEvent::WatchStarted { watching, .. } => {
            let mut out = String::new();
            for line in watching {
                out.push_str(&format!(
                    "{} {} Watching: {}\n",
                    prefix,
                    Icon::Watch.colored(supports_color, supports_unicode),
                    line
                ));
            }
            out
        }
        WatchEvent::FileChanged { path } => format!(
            "{} {} Changed: {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path
        ),
        WatchEvent::TaskStarted { task } => format!(
            "{} {} Running {}...\n",
            prefix,
            Icon::Progress.colored(supports_color, supports_unicode),
            task
        ),
        WatchEvent::TaskComplete {
            task,
            files,
            duration_ms,
        } => format!(
            "{} {} {}: {} written ({}ms)\n",
            prefix,
            Icon::Success.colored(supports_color, supports_unicode),
            task,
            files,
            duration_ms
        ),
        WatchEvent::TaskFailed { task, message, .. } => format!(
            "{} {} {}: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            task,
            ColoredText::error(message.as_str()).render(supports_color)
        ),
        WatchEvent::RewriteComplete { substitutions } => format!(
            "{} {} rewrite: {} substitutions\n",
            prefix,
            Icon::Success.colored(supports_color, supports_unicode),
            substitutions
        ),
        WatchEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            message
        ),
        WatchEvent::Shutdown => format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        ),
    }
}
