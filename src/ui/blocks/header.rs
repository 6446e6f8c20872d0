use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Boxed banner shown once at the top of a command.
#[derive(Debug, Clone)]
pub struct CommandHeader {
    icon: Icon,
    title: String,
    items: Vec<(String, String)>,
}

impl CommandHeader {
    pub fn new(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            icon,
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.items.push((label.into(), value.into()));
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let title = ColoredText::info(self.title.as_str())
            .bold()
            .render(supports_color);
        let mut b = Box::with_title(format!(
            "{} {}",
            self.icon.colored(supports_color, supports_unicode),
            title
        ))
        .style(BoxStyle::Info);

        if !self.items.is_empty() {
            b.add_empty();
        }
        let label_width = self.items.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.items {
            let label = ColoredText::dim(format!("{:<width$}", label, width = label_width))
                .render(supports_color);
            b.add_line(format!("{}  {}", label, value));
        }
        b.render(supports_color, supports_unicode)
    }
}
