use crossterm::style::Color;

/// Design tokens for the leechup console UI.
///
/// Every color, icon and border glyph printed by the binary comes from here.
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";

    // Pipeline stages.
    pub const CLEAN: &str = "🧹";
    pub const PACKAGE: &str = "📦";
    pub const TIMEOUT: &str = "⏰";
    pub const LAUNCH: &str = "🚀";
    pub const DONE: &str = "🎉";
    pub const STOP: &str = "🛑";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "[>]";

    pub const CLEAN: &str = "[CLEAN]";
    pub const PACKAGE: &str = "[STEP]";
    pub const TIMEOUT: &str = "[TIMEOUT]";
    pub const LAUNCH: &str = "[START]";
    pub const DONE: &str = "[DONE]";
    pub const STOP: &str = "[STOP]";
}

/// Box-drawing glyphs for one rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

pub const BORDERS: BorderSet = BorderSet {
    top_left: "╔",
    top_right: "╗",
    bottom_left: "╚",
    bottom_right: "╝",
    horizontal: "═",
    vertical: "║",
};

pub const BORDERS_ASCII: BorderSet = BorderSet {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    horizontal: "=",
    vertical: "|",
};
