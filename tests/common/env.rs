//! Test environment builder for isolated leechup runs.
//!
//! Every run gets its own content directory (standing in for `/content`)
//! and its own home, so no real config file or credentials leak in.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables cleared before every run so the host environment cannot leak in.
const LEECHUP_VARS: &[&str] = &[
    "LEECHUP_API_ID",
    "LEECHUP_API_HASH",
    "LEECHUP_BOT_TOKEN",
    "LEECHUP_USER_ID",
    "LEECHUP_DUMP_ID",
    "LEECHUP_REPO_URL",
    "LEECHUP_STRICT_VERIFY",
    "LEECHUP_COLOR",
    "LEECHUP_ANIMATION",
];

/// Result of running the leechup binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated content directory and home for one test.
pub struct TestEnv {
    pub content_dir: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            content_dir: tempfile::tempdir().expect("Failed to create content dir"),
            home_dir: tempfile::tempdir().expect("Failed to create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_leechup")),
        }
    }

    /// Path relative to the content directory
    pub fn content_path(&self, relative: &str) -> PathBuf {
        self.content_dir.path().join(relative)
    }

    /// Default installation directory under the content directory
    pub fn install_dir(&self) -> PathBuf {
        self.content_path("TelegramLeech")
    }

    /// Create the artifacts a previous run would leave behind.
    pub fn seed_previous_run(&self) {
        self.write_content_file("sample_data/mnist_test.csv", "0,0,0\n");
        self.write_content_file("TelegramLeech/my_bot.session", "session");
        self.write_content_file("TelegramLeech/credentials.json", "{}");
    }

    pub fn write_content_file(&self, relative: &str, content: &str) {
        write_file(&self.content_path(relative), content);
    }

    /// Write a config file under the home directory and return its path.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let path = self.home_dir.path().join("leechup.toml");
        write_file(&path, toml);
        path
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.home_dir.path())
            .args(args)
            .arg("--no-animation")
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("LEECHUP_CONTENT_DIR", self.content_dir.path())
            .env("NO_COLOR", "1");
        for key in LEECHUP_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute leechup");
        output_to_result(output)
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
