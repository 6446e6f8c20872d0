//! Steps command handler
//!
//! Prints the acquisition steps `run` would execute, without running them.

use anyhow::Result;

use leechup::config::Config;
use leechup::provision::{acquisition_steps, Layout, Step};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn cmd_steps(config: &Config, ui: &UiContext) -> Result<i32> {
    let layout = Layout::from_paths(&config.paths);
    let steps = acquisition_steps(&layout, &config.pipeline);

    print!(
        "{}",
        super::render_banner(config, ui, Icon::Package, "Acquisition steps")
    );
    print!(
        "{}",
        render_steps(&steps, config.pipeline.step_timeout_secs, ui)
    );
    Ok(0)
}

fn render_steps(steps: &[Step], timeout_secs: u64, ui: &UiContext) -> String {
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, step.description));
        out.push_str(&format!(
            "    {}\n",
            ColoredText::dim(format!("$ {}", step.command)).render(ui.color)
        ));
    }
    out.push_str(&format!(
        "\nEach step is allowed {}s and the first failure stops the run.\n",
        timeout_secs
    ));
    out
}
