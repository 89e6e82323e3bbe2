pub mod build;
pub mod clean;
pub mod watch;

use assetline::ConfigWarning;

use crate::ui::primitives::icon::Icon;

/// One line per unknown configuration key
pub fn render_config_warnings(
    warnings: &[ConfigWarning],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    warnings
        .iter()
        .map(|w| {
            format!(
                "{} {}\n",
                Icon::Warning.colored(supports_color, supports_unicode),
                w
            )
        })
        .collect()
}
