//! CLI Argument Parsing
//!
//! ## Design Notes
//!
//! - Global flags (--color, --no-animation, --verbose, --config) are inherited by all subcommands
//! - Running without a subcommand is the same as `leechup run`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// leechup - provision and launch a Telegram leech bot in a notebook runtime
#[derive(Parser, Debug)]
#[command(name = "leechup")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Credentials can also come from LEECHUP_* environment variables or the config file.")]
pub struct Cli {
    /// Config file (default: ~/.config/leechup/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Disable the progress spinner
    #[arg(long, global = true)]
    pub no_animation: bool,

    /// Verbosity level (-v shows commands, -vv also shows full stderr)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the environment and start the bot (default)
    Run(RunArgs),

    /// Print the acquisition steps without running them
    Steps,

    /// Remove sample data, the previous installation and its session file
    Clean,
}

/// Credential overrides for `run`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Telegram API id
    #[arg(long)]
    pub api_id: Option<i64>,

    /// Telegram API hash
    #[arg(long)]
    pub api_hash: Option<String>,

    /// Bot token from @BotFather
    #[arg(long)]
    pub bot_token: Option<String>,

    /// Owner user id
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Dump chat id (ten-digit ids get the -100 prefix)
    #[arg(long, allow_negative_numbers = true)]
    pub dump_id: Option<i64>,

    /// Fail if the written credentials file does not read back identically
    #[arg(long)]
    pub strict_verify: bool,
}

impl RunArgs {
    /// Apply flags on top of file and environment configuration.
    pub fn apply(&self, config: &mut Config) {
        let creds = &mut config.credentials;
        if let Some(v) = self.api_id {
            creds.api_id = v;
        }
        if let Some(v) = &self.api_hash {
            creds.api_hash = v.clone();
        }
        if let Some(v) = &self.bot_token {
            creds.bot_token = v.clone();
        }
        if let Some(v) = self.user_id {
            creds.user_id = v;
        }
        if let Some(v) = self.dump_id {
            creds.dump_id = v;
        }
        if self.strict_verify {
            config.pipeline.strict_verify = true;
        }
    }
}
