//! Configuration loading

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, ProvisionResult};

use super::env_validator::{closest, parse_flag, EnvVarValidator};
use super::types::{AnimationMode, ColorMode, Config};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ProvisionResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ProvisionError::ConfigFile {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Default config location: `<config dir>/leechup/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("leechup").join("config.toml"))
}

/// Load the explicit config file, or the default one if it exists, or defaults.
///
/// An explicitly named file must exist. Environment overrides are applied on top.
pub fn resolve(explicit: Option<&Path>) -> ProvisionResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => load_with_warnings(&path)?,
            _ => (Config::default(), Vec::new()),
        },
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (LEECHUP_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok(), &mut std::io::stderr())
}

/// Apply overrides read through `get_env`, writing warnings for invalid values to `warn`.
pub fn with_env_overrides_from<W: Write>(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
    warn: &mut W,
) -> Config {
    let int_var = |name: &str, current: i64, warn: &mut W| match get_env(name) {
        Some(raw) => EnvVarValidator::integer(name).parse_with_writer(
            raw.trim(),
            |v| v.parse::<i64>().ok(),
            current,
            warn,
        ),
        None => current,
    };

    config.credentials.api_id = int_var("LEECHUP_API_ID", config.credentials.api_id, warn);
    config.credentials.user_id = int_var("LEECHUP_USER_ID", config.credentials.user_id, warn);
    config.credentials.dump_id = int_var("LEECHUP_DUMP_ID", config.credentials.dump_id, warn);

    if let Some(hash) = get_env("LEECHUP_API_HASH") {
        config.credentials.api_hash = hash;
    }
    if let Some(token) = get_env("LEECHUP_BOT_TOKEN") {
        config.credentials.bot_token = token;
    }

    if let Some(dir) = get_env("LEECHUP_CONTENT_DIR") {
        config.paths.content_dir = PathBuf::from(dir);
    }
    if let Some(url) = get_env("LEECHUP_REPO_URL") {
        config.pipeline.repo_url = url;
    }

    if let Some(raw) = get_env("LEECHUP_STRICT_VERIFY") {
        config.pipeline.strict_verify = EnvVarValidator::new(
            "LEECHUP_STRICT_VERIFY",
            &["true", "false", "1", "0", "yes", "no", "on", "off"],
        )
        .parse_with_writer(&raw, parse_flag, config.pipeline.strict_verify, warn);
    }

    if let Some(raw) = get_env("LEECHUP_COLOR") {
        config.output.color = EnvVarValidator::new("LEECHUP_COLOR", &["auto", "always", "never"])
            .parse_with_writer(
                &raw,
                |v| match v.trim().to_lowercase().as_str() {
                    "auto" => Some(ColorMode::Auto),
                    "always" => Some(ColorMode::Always),
                    "never" => Some(ColorMode::Never),
                    _ => None,
                },
                config.output.color,
                warn,
            );
    }

    if let Some(raw) = get_env("LEECHUP_ANIMATION") {
        config.output.animation =
            EnvVarValidator::new("LEECHUP_ANIMATION", &["auto", "always", "never"])
                .parse_with_writer(
                    &raw,
                    |v| match v.trim().to_lowercase().as_str() {
                        "auto" => Some(AnimationMode::Auto),
                        "always" => Some(AnimationMode::Always),
                        "never" => Some(AnimationMode::Never),
                        _ => None,
                    },
                    config.output.animation,
                    warn,
                );
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "credentials",
        "api_id",
        "api_hash",
        "bot_token",
        "user_id",
        "dump_id",
        "paths",
        "content_dir",
        "install_dir",
        "sample_data_dir",
        "session_file",
        "credentials_file",
        "pipeline",
        "repo_url",
        "system_packages",
        "step_timeout_secs",
        "strict_verify",
        "python",
        "bot_module",
        "output",
        "color",
        "animation",
        "unicode",
    ];

    closest(unknown, CANDIDATES).map(str::to_string)
}
