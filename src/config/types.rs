//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::ProvisionResult;

use super::loader::{self, ConfigWarning};

/// Credential values as they appear in config sources.
///
/// Unset values stay zero/empty so validation can name them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub api_id: i64,

    #[serde(default)]
    pub api_hash: String,

    #[serde(default)]
    pub bot_token: String,

    #[serde(default)]
    pub user_id: i64,

    #[serde(default)]
    pub dump_id: i64,
}

impl CredentialsConfig {
    /// Build the normalized credentials record.
    pub fn to_credentials(&self) -> Credentials {
        Credentials::new(
            self.api_id,
            self.api_hash.clone(),
            self.bot_token.clone(),
            self.user_id,
            self.dump_id,
        )
    }
}

/// Filesystem layout of the notebook runtime
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathsConfig {
    /// Root of the notebook workspace
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Installation directory (defaults to `<content_dir>/TelegramLeech`)
    #[serde(default)]
    pub install_dir: Option<PathBuf>,

    /// Notebook sample data (defaults to `<content_dir>/sample_data`)
    #[serde(default)]
    pub sample_data_dir: Option<PathBuf>,

    /// Session file name inside the installation directory
    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// Credentials file name inside the installation directory
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            install_dir: None,
            sample_data_dir: None,
            session_file: default_session_file(),
            credentials_file: default_credentials_file(),
        }
    }
}

impl PathsConfig {
    pub fn install_dir(&self) -> PathBuf {
        self.install_dir
            .clone()
            .unwrap_or_else(|| self.content_dir.join("TelegramLeech"))
    }

    pub fn sample_data_dir(&self) -> PathBuf {
        self.sample_data_dir
            .clone()
            .unwrap_or_else(|| self.content_dir.join("sample_data"))
    }

    pub fn session_file(&self) -> PathBuf {
        self.install_dir().join(&self.session_file)
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.install_dir().join(&self.credentials_file)
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("/content")
}

fn default_session_file() -> String {
    "my_bot.session".to_string()
}

fn default_credentials_file() -> String {
    "credentials.json".to_string()
}

/// Acquisition and handoff settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    /// Packages installed with apt
    #[serde(default = "default_system_packages")]
    pub system_packages: Vec<String>,

    /// Wall-clock allowance per shell step
    #[serde(default = "default_step_timeout_secs")]
    pub step_timeout_secs: u64,

    /// Treat a credentials verification mismatch as fatal
    #[serde(default)]
    pub strict_verify: bool,

    /// Interpreter used to start the bot
    #[serde(default = "default_python")]
    pub python: String,

    /// Module started with `<python> -m`
    #[serde(default = "default_bot_module")]
    pub bot_module: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            repo_url: default_repo_url(),
            system_packages: default_system_packages(),
            step_timeout_secs: default_step_timeout_secs(),
            strict_verify: false,
            python: default_python(),
            bot_module: default_bot_module(),
        }
    }
}

fn default_repo_url() -> String {
    "https://github.com/Shineii86/TelegramLeech".to_string()
}

fn default_system_packages() -> Vec<String> {
    vec!["ffmpeg".to_string(), "aria2".to_string()]
}

fn default_step_timeout_secs() -> u64 {
    300
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_bot_module() -> String {
    "colab_leecher".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub animation: AnimationMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            animation: AnimationMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Animation output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ProvisionResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ProvisionResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (LEECHUP_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
