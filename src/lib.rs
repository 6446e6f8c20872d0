//! leechup - provisioner for notebook-hosted Telegram leech bots
//!
//! Validates bot credentials, resets the notebook workspace, clones and
//! prepares the bot project, writes `credentials.json`, and hands off to the
//! bot process.

pub mod config;
pub mod credentials;
pub mod error;
pub mod presentation;
pub mod provision;

// Re-exports for convenience
pub use config::Config;
pub use credentials::{normalize_dump_id, Credentials};
pub use error::{ProvisionError, ProvisionResult};
pub use provision::{Outcome, ProgressSink, ProvisionEvent, Provisioner};
