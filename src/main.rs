//! leechup CLI - provision a notebook runtime and start the Telegram leech bot
//!
//! Usage: leechup [COMMAND]
//!
//! Commands:
//!   run    Provision the environment and start the bot (default)
//!   steps  Print the acquisition steps without running them
//!   clean  Remove sample data, the previous installation and its session file

mod commands;
mod ui;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use leechup::config;
use leechup::presentation::{Cli, Commands, RunArgs};

use crate::ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let (mut config, warnings) = config::resolve(cli.config.as_deref())?;

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(RunArgs::default()));
    if let Commands::Run(args) = &command {
        args.apply(&mut config);
    }

    let ui = UiContext::new(cli.verbose, cli.color, cli.no_animation, &config);
    ui::output::print_config_warnings(&warnings, &ui);

    match command {
        Commands::Run(_) => {
            let cancel = Arc::new(AtomicBool::new(false));
            let flag = cancel.clone();
            ctrlc::set_handler(move || {
                flag.store(true, Ordering::SeqCst);
            })
            .context("failed to install the Ctrl+C handler")?;

            commands::run::cmd_run(&config, &ui, cancel)
        }
        Commands::Steps => commands::steps::cmd_steps(&config, &ui),
        Commands::Clean => commands::clean::cmd_clean(&config, &ui),
    }
}
