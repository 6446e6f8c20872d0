use leechup::config::{AnimationMode, ColorMode, Config};
use leechup::presentation::ColorWhen;

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// Resolved output settings for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub verbose: u8,
    pub color: bool,
    pub unicode: bool,
    pub animation: bool,
}

impl UiContext {
    pub fn new(
        verbose: u8,
        cli_color: Option<ColorWhen>,
        cli_no_animation: bool,
        config: &Config,
    ) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(verbose, cli_color, cli_no_animation, config, caps)
    }

    pub(crate) fn from_caps(
        verbose: u8,
        cli_color: Option<ColorWhen>,
        cli_no_animation: bool,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        let animation = if cli_no_animation || caps.is_ci {
            false
        } else {
            match config.output.animation {
                AnimationMode::Never => false,
                AnimationMode::Always => true,
                AnimationMode::Auto => caps.is_tty,
            }
        };

        Self {
            verbose,
            color,
            unicode,
            animation,
        }
    }
}

#[cfg(test)]
impl UiContext {
    /// No color, ASCII glyphs, no spinner.
    pub(crate) fn plain(verbose: u8) -> Self {
        Self {
            verbose,
            color: false,
            unicode: false,
            animation: false,
        }
    }
}
