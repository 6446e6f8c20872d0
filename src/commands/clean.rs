//! Clean command handler
//!
//! Runs only the reset stage: sample data, previous installation, session file.

use anyhow::Result;

use leechup::config::Config;
use leechup::provision::{reset_environment, Layout, Removed};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn cmd_clean(config: &Config, ui: &UiContext) -> Result<i32> {
    let layout = Layout::from_paths(&config.paths);

    println!(
        "{} Cleaning up environment...",
        Icon::Clean.colored(ui.color, ui.unicode)
    );
    let removed = reset_environment(&layout)?;
    print!("{}", render_removed(&removed, ui));
    Ok(0)
}

fn render_removed(removed: &[Removed], ui: &UiContext) -> String {
    if removed.is_empty() {
        return "Nothing to clean\n".to_string();
    }

    let icon = Icon::Success.colored(ui.color, ui.unicode);
    removed
        .iter()
        .map(|r| {
            format!(
                "{} Removed {} ({})\n",
                icon,
                r.artifact.label(),
                r.path.display()
            )
        })
        .collect()
}
