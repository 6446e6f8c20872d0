use leechup::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn format_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) -> String {
    let icon = Icon::Warning.colored(ui.color, ui.unicode);
    let mut out = String::new();
    for w in warnings {
        match w.line {
            Some(line) => out.push_str(&format!(
                "{} Unknown config key '{}' in {}:{}\n",
                icon,
                w.key,
                w.file.display(),
                line
            )),
            None => out.push_str(&format!(
                "{} Unknown config key '{}' in {}\n",
                icon,
                w.key,
                w.file.display()
            )),
        }

        if let Some(suggestion) = &w.suggestion {
            out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
        }
    }
    out
}

pub fn print_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    eprint!("{}", format_config_warnings(warnings, ui));
}
