use assetline::config::{ColorMode, Config};

use crate::cli::ColorWhen;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, cli_color: Option<ColorWhen>, config: &Config) -> Self {
        Self::from_caps(json, cli_color, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        cli_color: Option<ColorWhen>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.ui.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.ui.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        Self {
            json,
            color: color && !json,
            unicode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_caps(is_ci: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            supports_color: true,
            supports_unicode: true,
            is_ci,
        }
    }

    #[test]
    fn ci_disables_auto_color() {
        let ui = UiContext::from_caps(false, None, &Config::default(), tty_caps(true));
        assert!(!ui.color);
    }

    #[test]
    fn cli_flag_beats_config() {
        let mut config = Config::default();
        config.ui.color = ColorMode::Never;
        let ui = UiContext::from_caps(false, Some(ColorWhen::Always), &config, tty_caps(false));
        assert!(ui.color);
    }

    #[test]
    fn json_output_is_never_colored() {
        let ui = UiContext::from_caps(true, Some(ColorWhen::Always), &Config::default(), tty_caps(false));
        assert!(!ui.color);
    }

    #[test]
    fn config_can_disable_unicode() {
        let mut config = Config::default();
        config.ui.unicode = false;
        let ui = UiContext::from_caps(false, None, &config, tty_caps(false));
        assert!(!ui.unicode);
    }
}
