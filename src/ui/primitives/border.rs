use crate::ui::theme::{self, BorderSet};

impl BorderSet {
    pub fn for_terminal(supports_unicode: bool) -> Self {
        if supports_unicode {
            theme::BORDERS
        } else {
            theme::BORDERS_ASCII
        }
    }

    /// Top edge enclosing `inner` columns.
    pub fn top(&self, inner: usize) -> String {
        format!(
            "{}{}{}",
            self.top_left,
            self.horizontal.repeat(inner),
            self.top_right
        )
    }

    /// Bottom edge enclosing `inner` columns.
    pub fn bottom(&self, inner: usize) -> String {
        format!(
            "{}{}{}",
            self.bottom_left,
            self.horizontal.repeat(inner),
            self.bottom_right
        )
    }
}
