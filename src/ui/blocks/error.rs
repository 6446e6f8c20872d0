use std::path::PathBuf;

use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Boxed error report with an optional location and fix hint.
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    location: Option<PathBuf>,
    message: String,
    details: Vec<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            location: None,
            message: message.into(),
            details: Vec::new(),
            fix: None,
        }
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Extra lines shown under the message, e.g. captured stderr.
    pub fn with_details<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut b = Box::with_title("ERROR").style(BoxStyle::Error);

        if let Some(path) = &self.location {
            b.add_line(path.display().to_string());
            b.add_empty();
        }
        b.add_line(self.message.clone());

        if !self.details.is_empty() {
            b.add_empty();
            for line in &self.details {
                b.add_line(format!("  {}", line));
            }
        }

        if let Some(fix) = &self.fix {
            b.add_empty();
            b.add_line(format!("FIX: {}", fix));
        }

        b.render(supports_color, supports_unicode)
    }
}
