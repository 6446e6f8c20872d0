use crate::ui::primitives::text::SemanticColor;
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Clean,
    Package,
    Timeout,
    Launch,
    Done,
    Stop,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Clean) => theme::icons::CLEAN,
            (true, Icon::Package) => theme::icons::PACKAGE,
            (true, Icon::Timeout) => theme::icons::TIMEOUT,
            (true, Icon::Launch) => theme::icons::LAUNCH,
            (true, Icon::Done) => theme::icons::DONE,
            (true, Icon::Stop) => theme::icons::STOP,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Clean) => theme::icons_ascii::CLEAN,
            (false, Icon::Package) => theme::icons_ascii::PACKAGE,
            (false, Icon::Timeout) => theme::icons_ascii::TIMEOUT,
            (false, Icon::Launch) => theme::icons_ascii::LAUNCH,
            (false, Icon::Done) => theme::icons_ascii::DONE,
            (false, Icon::Stop) => theme::icons_ascii::STOP,
        }
    }

    pub fn role(&self) -> SemanticColor {
        match self {
            Icon::Success | Icon::Done => SemanticColor::Success,
            Icon::Error | Icon::Stop => SemanticColor::Error,
            Icon::Warning | Icon::Timeout => SemanticColor::Warning,
            Icon::Arrow => SemanticColor::Dim,
            Icon::Clean | Icon::Package | Icon::Launch => SemanticColor::Info,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        self.role()
            .paint(self.render(supports_unicode), supports_color)
    }
}
