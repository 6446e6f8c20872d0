//! Run command handler
//!
//! Full provisioning: validate, reset, acquire, persist, verify, hand off.

use std::io;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use leechup::config::Config;
use leechup::Provisioner;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::reporter::ConsoleReporter;

/// Execute the run command, returning the process exit code.
pub fn cmd_run(config: &Config, ui: &UiContext, cancel: Arc<AtomicBool>) -> Result<i32> {
    print!(
        "{}",
        super::render_banner(config, ui, Icon::Launch, "Telegram Leech Bot Setup")
    );

    let credentials = config.credentials.to_credentials();
    let provisioner = Provisioner::from_config(config, cancel);
    let mut reporter = ConsoleReporter::new(Arc::new(Mutex::new(io::stdout())), *ui);

    let outcome = provisioner.run(&credentials, &mut reporter)?;
    reporter.finish(&outcome);
    Ok(outcome.exit_code())
}
