use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::text::SemanticColor;
use crate::ui::theme::BorderSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Info,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Box {
    title: Option<String>,
    content: Vec<String>,
    style: BoxStyle,
}

impl Box {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        for part in line.lines() {
            self.content.push(part.to_string());
        }
    }

    pub fn add_empty(&mut self) {
        self.content.push(String::new());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.push(title.clone());
        }
        lines.extend(self.content.iter().cloned());

        let inner_width = lines
            .iter()
            .map(|l| visible_width(l))
            .max()
            .unwrap_or(0)
            .saturating_add(2)
            .max(2);

        let borders = BorderSet::for_terminal(supports_unicode);
        let edge = |s: &str| color_border(s, supports_color, self.style);

        let mut out = edge(&borders.top(inner_width));
        out.push('\n');
        for line in &lines {
            let pad = inner_width - 1 - visible_width(line);
            out.push_str(&format!(
                "{v} {line}{pad}{v}\n",
                v = edge(borders.vertical),
                line = line,
                pad = " ".repeat(pad)
            ));
        }
        out.push_str(&edge(&borders.bottom(inner_width)));
        out.push('\n');
        out
    }
}

fn color_border(s: &str, supports_color: bool, style: BoxStyle) -> String {
    let role = match style {
        BoxStyle::Info => SemanticColor::Info,
        BoxStyle::Error => SemanticColor::Error,
    };
    role.paint(s, supports_color)
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // ESC [ ... <final>
            if matches!(chars.peek(), Some('[') | Some(']')) {
                let _ = chars.next();
            }
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    Cow::Owned(out)
}
