//! Shell command execution with a wall-clock allowance
//!
//! A step never raises: spawn faults, non-zero exits, timeouts and operator
//! interrupts all come back as a [`StepOutcome`].

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use super::step::Step;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to wait for the stderr reader after the shell has exited.
///
/// A background process started by the step can keep the pipe open.
const STDERR_GRACE: Duration = Duration::from_secs(1);

/// Result of running one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    /// The command exited non-zero (`code` is `None` when killed by a signal)
    Failed { code: Option<i32>, stderr: String },
    /// The command exceeded its allowance and was killed
    TimedOut { after: Duration },
    /// The command could not be started or waited on
    Faulted { message: String },
    /// The operator interrupted the run while the command was active
    Interrupted,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }
}

/// Executes a step's shell command
pub trait CommandRunner {
    fn run(&self, step: &Step, timeout: Duration) -> StepOutcome;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, step: &Step, timeout: Duration) -> StepOutcome {
        (**self).run(step, timeout)
    }
}

/// Runs commands with `sh -c`, capturing stderr and discarding stdout.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    cancel: Arc<AtomicBool>,
}

impl ShellRunner {
    /// `cancel` is set by the interrupt handler; an active command is killed when it flips.
    pub fn new(cancel: Arc<AtomicBool>) -> Self {
        Self { cancel }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, step: &Step, timeout: Duration) -> StepOutcome {
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&step.command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        // Own process group, so a timeout or cancel reaches `apt` and `pip3` too.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let spawned = command.spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                return StepOutcome::Faulted {
                    message: format!("failed to start shell: {}", e),
                }
            }
        };

        let stderr = drain_stderr(&mut child);
        let started = Instant::now();

        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    if status.success() {
                        return StepOutcome::Succeeded;
                    }
                    // The shell can still die from a signal sent to it directly.
                    if self.cancel.load(Ordering::SeqCst) {
                        return StepOutcome::Interrupted;
                    }
                    return StepOutcome::Failed {
                        code: status.code(),
                        stderr: stderr.recv_timeout(STDERR_GRACE).unwrap_or_default(),
                    };
                }
                Ok(None) => {
                    if self.cancel.load(Ordering::SeqCst) {
                        terminate(&mut child);
                        return StepOutcome::Interrupted;
                    }
                    if started.elapsed() >= timeout {
                        terminate(&mut child);
                        return StepOutcome::TimedOut { after: timeout };
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    terminate(&mut child);
                    return StepOutcome::Faulted {
                        message: format!("failed to wait for command: {}", e),
                    };
                }
            }
        }
    }
}

/// Read the child's stderr on a helper thread so a chatty command cannot fill the pipe.
fn drain_stderr(child: &mut Child) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    if let Some(mut pipe) = child.stderr.take() {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            let _ = tx.send(String::from_utf8_lossy(&buf).trim_end().to_string());
        });
    }
    rx
}

/// Kill the step's whole process group, then reap the shell.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    kill_group(child.id());
    let _ = child.kill();
    let _ = child.wait();
}

/// The shell leads its own group, so the group id is its pid.
#[cfg(unix)]
fn kill_group(pid: u32) {
    if let Ok(pgid) = libc::pid_t::try_from(pid) {
        // SAFETY: kill(2) takes plain integers and touches no memory of ours.
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
}
