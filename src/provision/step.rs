//! Shell steps of the acquisition stage

use std::path::Path;

use crate::config::PipelineConfig;

use super::layout::Layout;

/// One shell command and the label shown while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub command: String,
    pub description: String,
}

impl Step {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// The four acquisition steps, in execution order.
pub fn acquisition_steps(layout: &Layout, pipeline: &PipelineConfig) -> Vec<Step> {
    let install_dir = &layout.install_dir;
    let packages = pipeline
        .system_packages
        .iter()
        .map(|p| shell_quote(p))
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        Step::new(
            format!(
                "git clone {} {}",
                shell_quote(&pipeline.repo_url),
                quote_path(install_dir)
            ),
            "Cloning repository",
        ),
        Step::new(
            format!("bash {}", quote_path(&install_dir.join("setup.sh"))),
            "Running setup script",
        ),
        Step::new(
            format!("apt update && apt install -y {}", packages),
            "Installing system dependencies",
        ),
        Step::new(
            format!(
                "pip3 install -r {}",
                quote_path(&install_dir.join("requirements.txt"))
            ),
            "Installing Python dependencies",
        ),
    ]
}

fn quote_path(path: &Path) -> String {
    shell_quote(&path.to_string_lossy())
}

/// Quote `value` for `sh` unless it only holds characters that need no quoting.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
