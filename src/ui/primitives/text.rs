use crossterm::style::{Color, Stylize};

use crate::ui::theme;

/// The five theme roles a piece of output can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl SemanticColor {
    pub fn color(self) -> Color {
        match self {
            SemanticColor::Success => theme::colors::SUCCESS,
            SemanticColor::Error => theme::colors::ERROR,
            SemanticColor::Warning => theme::colors::WARNING,
            SemanticColor::Info => theme::colors::INFO,
            SemanticColor::Dim => theme::colors::DIM,
        }
    }

    /// Wrap `text` in this role's color, or return it unchanged without color support.
    pub fn paint(self, text: &str, supports_color: bool) -> String {
        if supports_color {
            format!("{}", text.with(self.color()))
        } else {
            text.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    role: SemanticColor,
    bold: bool,
}

impl ColoredText {
    pub fn new(role: SemanticColor, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role,
            bold: false,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(SemanticColor::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(SemanticColor::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(SemanticColor::Warning, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(SemanticColor::Info, text)
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::new(SemanticColor::Dim, text)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn render(&self, supports_color: bool) -> String {
        match (supports_color, self.bold) {
            (false, _) => self.text.clone(),
            (true, false) => self.role.paint(&self.text, true),
            (true, true) => format!("{}", self.text.as_str().with(self.role.color()).bold()),
        }
    }
}
