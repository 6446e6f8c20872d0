//! Resolved filesystem layout for one provisioning run

use std::path::PathBuf;

use crate::config::PathsConfig;

/// Paths the provisioner owns for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub sample_data_dir: PathBuf,
    pub install_dir: PathBuf,
    pub session_file: PathBuf,
    pub credentials_file: PathBuf,
}

impl Layout {
    pub fn from_paths(paths: &PathsConfig) -> Self {
        Self {
            sample_data_dir: paths.sample_data_dir(),
            install_dir: paths.install_dir(),
            session_file: paths.session_file(),
            credentials_file: paths.credentials_file(),
        }
    }

    /// Layout rooted at `content_dir` with every other setting at its default.
    pub fn under(content_dir: impl Into<PathBuf>) -> Self {
        Self::from_paths(&PathsConfig {
            content_dir: content_dir.into(),
            ..PathsConfig::default()
        })
    }
}
