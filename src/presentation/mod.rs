//! Presentation Layer
//!
//! CLI argument parsing (via clap) and the mapping from CLI flags onto
//! configuration. Rendering lives in the binary's `ui` module.

pub mod cli;

pub use cli::{Cli, ColorWhen, Commands, RunArgs};
