//! Handoff to the bot process

use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::error::{ProvisionError, ProvisionResult};

/// How the bot process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The process exited on its own (`code` is `None` when killed by a signal)
    Exited { code: Option<i32> },
    /// The operator interrupted the bot
    StoppedByUser,
}

/// Starts the bot and waits for it
pub trait Launcher {
    /// Command line shown to the operator
    fn describe(&self) -> String;

    fn launch(&self, install_dir: &Path) -> ProvisionResult<LaunchOutcome>;
}

impl<T: Launcher + ?Sized> Launcher for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn launch(&self, install_dir: &Path) -> ProvisionResult<LaunchOutcome> {
        (**self).launch(install_dir)
    }
}

/// Runs `<python> -m <module>` inside the installation directory with inherited stdio.
#[derive(Debug, Clone)]
pub struct BotLauncher {
    python: String,
    module: String,
    cancel: Arc<AtomicBool>,
}

impl BotLauncher {
    pub fn new(python: impl Into<String>, module: impl Into<String>, cancel: Arc<AtomicBool>) -> Self {
        Self {
            python: python.into(),
            module: module.into(),
            cancel,
        }
    }

    pub fn from_config(pipeline: &PipelineConfig, cancel: Arc<AtomicBool>) -> Self {
        Self::new(pipeline.python.clone(), pipeline.bot_module.clone(), cancel)
    }
}

impl Launcher for BotLauncher {
    fn describe(&self) -> String {
        format!("{} -m {}", self.python, self.module)
    }

    fn launch(&self, install_dir: &Path) -> ProvisionResult<LaunchOutcome> {
        // The child shares our terminal, so Ctrl+C reaches it directly;
        // the flag only tells us why it exited.
        let status = Command::new(&self.python)
            .arg("-m")
            .arg(&self.module)
            .current_dir(install_dir)
            .status()
            .map_err(|source| ProvisionError::Launch {
                program: self.describe(),
                source,
            })?;

        if self.cancel.load(Ordering::SeqCst) {
            return Ok(LaunchOutcome::StoppedByUser);
        }
        Ok(LaunchOutcome::Exited {
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn describe_uses_module_flag() {
        let launcher = BotLauncher::new("python3", "colab_leecher", Arc::new(AtomicBool::new(false)));
        assert_eq!(launcher.describe(), "python3 -m colab_leecher");
    }

    #[test]
    fn missing_interpreter_is_launch_error() {
        let dir = tempdir().unwrap();
        let launcher = BotLauncher::new(
            "leechup-no-such-interpreter",
            "colab_leecher",
            Arc::new(AtomicBool::new(false)),
        );

        let err = launcher.launch(dir.path()).unwrap_err();
        assert!(matches!(err, ProvisionError::Launch { .. }));
    }

    /// Write an executable stand-in for the interpreter that ignores `-m <module>`.
    fn fake_interpreter(dir: &Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-python");
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn runs_in_install_dir_and_reports_exit_code() {
        let bin = tempdir().unwrap();
        let install = tempdir().unwrap();
        std::fs::write(install.path().join("setup.sh"), "").unwrap();
        let python = fake_interpreter(bin.path(), "test -f setup.sh && exit 4\nexit 0\n");
        let launcher = BotLauncher::new(python, "colab_leecher", Arc::new(AtomicBool::new(false)));

        let outcome = launcher.launch(install.path()).unwrap();
        assert_eq!(outcome, LaunchOutcome::Exited { code: Some(4) });
    }

    #[test]
    fn cancel_flag_reports_stopped_by_user() {
        let bin = tempdir().unwrap();
        let install = tempdir().unwrap();
        let python = fake_interpreter(bin.path(), "exit 0\n");
        let launcher = BotLauncher::new(python, "colab_leecher", Arc::new(AtomicBool::new(true)));

        assert_eq!(
            launcher.launch(install.path()).unwrap(),
            LaunchOutcome::StoppedByUser
        );
    }
}
