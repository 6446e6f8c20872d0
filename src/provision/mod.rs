//! Provisioning pipeline
//!
//! Stages run strictly in order and the first failure ends the run:
//!
//! 1. validate credentials (before anything is touched)
//! 2. reset the environment
//! 3. run the acquisition steps (clone, setup script, apt, pip)
//! 4. persist and verify `credentials.json`
//! 5. hand off to the bot process
//!
//! Side effects of completed stages are left in place when a later stage fails.

mod launch;
mod layout;
mod persist;
mod reset;
mod runner;
mod step;
#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::{ProvisionError, ProvisionResult};

pub use launch::{BotLauncher, LaunchOutcome, Launcher};
pub use layout::Layout;
pub use persist::{read_credentials, to_json, verify_credentials, write_credentials, Verification};
pub use reset::{remove_path, reset_environment, Artifact, Removed};
pub use runner::{CommandRunner, ShellRunner, StepOutcome};
pub use step::{acquisition_steps, shell_quote, Step};

/// Progress notifications emitted while provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionEvent {
    /// Validation failed; nothing else runs
    CredentialsMissing { fields: Vec<&'static str> },
    /// Validation passed and destructive work is about to begin
    Started,
    Removed(Removed),
    StepStarted {
        index: usize,
        total: usize,
        step: Step,
    },
    StepFinished {
        index: usize,
        step: Step,
        outcome: StepOutcome,
    },
    CredentialsSaved { path: PathBuf },
    CredentialsVerified {
        path: PathBuf,
        verification: Verification,
    },
    /// Every preparation stage succeeded; the bot is about to start
    HandoffStarting { install_dir: PathBuf, command: String },
    BotExited(LaunchOutcome),
    Interrupted,
}

/// Receives [`ProvisionEvent`]s
pub trait ProgressSink {
    fn emit(&mut self, event: ProvisionEvent);
}

impl<F: FnMut(ProvisionEvent)> ProgressSink for F {
    fn emit(&mut self, event: ProvisionEvent) {
        self(event)
    }
}

/// Why a run stopped before the handoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    MissingCredentials(Vec<&'static str>),
    StepFailed {
        index: usize,
        step: Step,
        outcome: StepOutcome,
    },
    Interrupted,
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// All stages succeeded and the bot ran
    Launched(LaunchOutcome),
    Aborted(AbortReason),
}

impl Outcome {
    /// Whether the run counts as successful (exit code 0).
    ///
    /// The bot's own exit status is reported but does not fail the run;
    /// an operator interrupt does.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Launched(LaunchOutcome::Exited { .. }))
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Tunables for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOptions {
    pub step_timeout: Duration,
    pub strict_verify: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            step_timeout: Duration::from_secs(300),
            strict_verify: false,
        }
    }
}

/// Fail-fast provisioning pipeline
pub struct Provisioner<R, L> {
    layout: Layout,
    steps: Vec<Step>,
    options: ProvisionOptions,
    runner: R,
    launcher: L,
    cancel: Arc<AtomicBool>,
}

impl Provisioner<ShellRunner, BotLauncher> {
    /// Pipeline with real shell execution and bot launch, configured from `config`.
    pub fn from_config(config: &Config, cancel: Arc<AtomicBool>) -> Self {
        let layout = Layout::from_paths(&config.paths);
        let steps = acquisition_steps(&layout, &config.pipeline);
        let options = ProvisionOptions {
            step_timeout: Duration::from_secs(config.pipeline.step_timeout_secs),
            strict_verify: config.pipeline.strict_verify,
        };
        Self::new(
            layout,
            steps,
            options,
            ShellRunner::new(cancel.clone()),
            BotLauncher::from_config(&config.pipeline, cancel.clone()),
            cancel,
        )
    }
}

impl<R: CommandRunner, L: Launcher> Provisioner<R, L> {
    pub fn new(
        layout: Layout,
        steps: Vec<Step>,
        options: ProvisionOptions,
        runner: R,
        launcher: L,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            layout,
            steps,
            options,
            runner,
            launcher,
            cancel,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every stage for `credentials`.
    ///
    /// Step failures and interrupts end in [`Outcome::Aborted`]; reset and
    /// persistence faults, a failed bot start, and (in strict mode) a
    /// verification mismatch are returned as errors.
    pub fn run(
        &self,
        credentials: &Credentials,
        sink: &mut impl ProgressSink,
    ) -> ProvisionResult<Outcome> {
        if let Err(ProvisionError::MissingCredentials { fields }) = credentials.validate() {
            sink.emit(ProvisionEvent::CredentialsMissing {
                fields: fields.clone(),
            });
            return Ok(Outcome::Aborted(AbortReason::MissingCredentials(fields)));
        }

        if let Some(outcome) = self.interrupted(sink) {
            return Ok(outcome);
        }
        sink.emit(ProvisionEvent::Started);

        for removed in reset_environment(&self.layout)? {
            sink.emit(ProvisionEvent::Removed(removed));
        }

        let total = self.steps.len();
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(outcome) = self.interrupted(sink) {
                return Ok(outcome);
            }
            sink.emit(ProvisionEvent::StepStarted {
                index,
                total,
                step: step.clone(),
            });
            let outcome = self.runner.run(step, self.options.step_timeout);
            sink.emit(ProvisionEvent::StepFinished {
                index,
                step: step.clone(),
                outcome: outcome.clone(),
            });

            match outcome {
                StepOutcome::Succeeded => {}
                StepOutcome::Interrupted => {
                    sink.emit(ProvisionEvent::Interrupted);
                    return Ok(Outcome::Aborted(AbortReason::Interrupted));
                }
                outcome => {
                    return Ok(Outcome::Aborted(AbortReason::StepFailed {
                        index,
                        step: step.clone(),
                        outcome,
                    }));
                }
            }
        }

        let path = &self.layout.credentials_file;
        write_credentials(path, credentials)?;
        sink.emit(ProvisionEvent::CredentialsSaved { path: path.clone() });

        let verification = verify_credentials(path, credentials)?;
        sink.emit(ProvisionEvent::CredentialsVerified {
            path: path.clone(),
            verification,
        });
        if verification == Verification::Mismatch && self.options.strict_verify {
            return Err(ProvisionError::VerificationMismatch { path: path.clone() });
        }

        if let Some(outcome) = self.interrupted(sink) {
            return Ok(outcome);
        }
        sink.emit(ProvisionEvent::HandoffStarting {
            install_dir: self.layout.install_dir.clone(),
            command: self.launcher.describe(),
        });

        let launched = self.launcher.launch(&self.layout.install_dir)?;
        sink.emit(ProvisionEvent::BotExited(launched));
        Ok(Outcome::Launched(launched))
    }

    fn interrupted(&self, sink: &mut impl ProgressSink) -> Option<Outcome> {
        if self.cancel.load(Ordering::SeqCst) {
            sink.emit(ProvisionEvent::Interrupted);
            return Some(Outcome::Aborted(AbortReason::Interrupted));
        }
        None
    }
}
