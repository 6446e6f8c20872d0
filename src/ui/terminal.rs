use is_terminal::IsTerminal;

/// Variables whose presence marks a CI runner
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "JENKINS_HOME",
    "BUILDKITE",
    "CIRCLECI",
    "TRAVIS",
];

/// Locale variables in lookup order; the first non-empty one decides.
const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];

/// What the attached terminal can display.
///
/// Progress is drawn on stdout, so that is the stream probed for a TTY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
}

impl TerminalCapabilities {
    /// Derive capabilities from environment lookups and whether stdout is a TTY.
    pub fn from_env(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> Self {
        let dumb = get_env("TERM").is_some_and(|t| t.eq_ignore_ascii_case("dumb"));

        Self {
            is_tty,
            supports_color: is_tty && !dumb && get_env("NO_COLOR").is_none(),
            supports_unicode: !dumb && locale_is_utf8(&get_env),
            is_ci: CI_VARS.iter().any(|k| get_env(k).is_some()),
        }
    }
}

pub fn detect_capabilities() -> TerminalCapabilities {
    TerminalCapabilities::from_env(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

fn locale_is_utf8(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    let locale = LOCALE_VARS
        .iter()
        .filter_map(|k| get_env(k))
        .find(|v| !v.is_empty());

    match locale {
        Some(v) => {
            let v = v.to_lowercase();
            v.contains("utf-8") || v.contains("utf8")
        }
        // Notebook runtimes often leave the locale unset but render UTF-8 fine.
        None => true,
    }
}
