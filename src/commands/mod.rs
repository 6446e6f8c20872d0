pub mod clean;
pub mod run;
pub mod steps;

use leechup::config::Config;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

/// Boxed banner naming the project source and the install location.
pub(crate) fn render_banner(config: &Config, ui: &UiContext, icon: Icon, title: &str) -> String {
    let mut header = CommandHeader::new(icon, title);
    header.add("Repository", &config.pipeline.repo_url);
    header.add("Install", config.paths.install_dir().display().to_string());
    header.render(ui.color, ui.unicode)
}
