//! Configuration module for leechup
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (LEECHUP_*)
//! 3. Config file (`--config`, or ~/.config/leechup/config.toml)
//! 4. Built-in defaults matching the Colab runtime (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    default_config_path, resolve, with_env_overrides_from, ConfigWarning,
};
pub use types::{
    AnimationMode, ColorMode, Config, CredentialsConfig, OutputConfig, PathsConfig,
    PipelineConfig,
};
