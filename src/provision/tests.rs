//! Pipeline tests with scripted step outcomes

use super::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Returns queued outcomes in order and records which commands ran.
struct ScriptedRunner {
    outcomes: RefCell<VecDeque<StepOutcome>>,
    ran: RefCell<Vec<String>>,
    on_run: Option<Box<dyn Fn(&Step)>>,
}

impl ScriptedRunner {
    fn new(outcomes: Vec<StepOutcome>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            ran: RefCell::new(Vec::new()),
            on_run: None,
        }
    }

    fn all_succeed() -> Self {
        Self::new(vec![StepOutcome::Succeeded; 4])
    }

    fn ran(&self) -> Vec<String> {
        self.ran.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, step: &Step, _timeout: Duration) -> StepOutcome {
        self.ran.borrow_mut().push(step.description.clone());
        if let Some(hook) = &self.on_run {
            hook(step);
        }
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(StepOutcome::Succeeded)
    }
}

struct MockLauncher {
    outcome: LaunchOutcome,
    launched_in: RefCell<Option<PathBuf>>,
}

impl MockLauncher {
    fn exits(code: i32) -> Self {
        Self {
            outcome: LaunchOutcome::Exited { code: Some(code) },
            launched_in: RefCell::new(None),
        }
    }
}

impl Launcher for MockLauncher {
    fn describe(&self) -> String {
        "python3 -m colab_leecher".to_string()
    }

    fn launch(&self, install_dir: &Path) -> ProvisionResult<LaunchOutcome> {
        *self.launched_in.borrow_mut() = Some(install_dir.to_path_buf());
        Ok(self.outcome)
    }
}

fn credentials() -> Credentials {
    Credentials::new(123456, "0123abcd", "123:AAbot", 42, 9876543210)
}

fn provisioner<'a>(
    root: &Path,
    runner: &'a ScriptedRunner,
    launcher: &'a MockLauncher,
) -> Provisioner<&'a ScriptedRunner, &'a MockLauncher> {
    let layout = Layout::under(root);
    let steps = acquisition_steps(&layout, &crate::config::PipelineConfig::default());
    Provisioner::new(
        layout,
        steps,
        ProvisionOptions::default(),
        runner,
        launcher,
        Arc::new(AtomicBool::new(false)),
    )
}

fn run_collecting<R: CommandRunner, L: Launcher>(
    provisioner: &Provisioner<R, L>,
    credentials: &Credentials,
) -> (ProvisionResult<Outcome>, Vec<ProvisionEvent>) {
    let mut events = Vec::new();
    let result = provisioner.run(credentials, &mut |e: ProvisionEvent| events.push(e));
    (result, events)
}

#[test]
fn end_to_end_success_writes_verified_credentials_and_launches() {
    let dir = tempdir().unwrap();
    let runner = ScriptedRunner::all_succeed();
    let launcher = MockLauncher::exits(0);
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, events) = run_collecting(&p, &credentials());
    let outcome = result.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(runner.ran().len(), 4);

    let saved = read_credentials(&p.layout().credentials_file).unwrap();
    assert_eq!(saved.dump_id, -1009876543210);
    assert_eq!(saved, credentials());

    assert!(events.contains(&ProvisionEvent::CredentialsVerified {
        path: p.layout().credentials_file.clone(),
        verification: Verification::Match,
    }));
    assert_eq!(
        launcher.launched_in.borrow().as_deref(),
        Some(p.layout().install_dir.as_path())
    );
    assert_eq!(
        events.last(),
        Some(&ProvisionEvent::BotExited(LaunchOutcome::Exited { code: Some(0) }))
    );
}

#[test]
fn missing_credentials_abort_before_touching_filesystem() {
    let dir = tempdir().unwrap();
    let runner = ScriptedRunner::all_succeed();
    let launcher = MockLauncher::exits(0);
    let p = provisioner(dir.path(), &runner, &launcher);
    fs::create_dir_all(&p.layout().sample_data_dir).unwrap();

    let incomplete = Credentials::new(123456, "", "123:AAbot", 42, 0);
    let (result, events) = run_collecting(&p, &incomplete);

    assert_eq!(
        result.unwrap(),
        Outcome::Aborted(AbortReason::MissingCredentials(vec!["API_HASH"]))
    );
    assert_eq!(
        events,
        vec![ProvisionEvent::CredentialsMissing {
            fields: vec!["API_HASH"]
        }]
    );
    assert!(p.layout().sample_data_dir.exists());
    assert!(runner.ran().is_empty());
    assert!(launcher.launched_in.borrow().is_none());
}

#[test]
fn failing_step_stops_later_steps() {
    let dir = tempdir().unwrap();
    let failure = StepOutcome::Failed {
        code: Some(100),
        stderr: "E: Unable to locate package".to_string(),
    };
    let runner = ScriptedRunner::new(vec![
        StepOutcome::Succeeded,
        StepOutcome::Succeeded,
        failure.clone(),
    ]);
    let launcher = MockLauncher::exits(0);
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, _) = run_collecting(&p, &credentials());

    match result.unwrap() {
        Outcome::Aborted(AbortReason::StepFailed {
            index,
            step,
            outcome,
        }) => {
            assert_eq!(index, 2);
            assert_eq!(step.description, "Installing system dependencies");
            assert_eq!(outcome, failure);
        }
        other => panic!("expected StepFailed, got {:?}", other),
    }
    assert!(!runner.ran().contains(&"Installing Python dependencies".to_string()));
    assert!(!p.layout().credentials_file.exists());
    assert!(launcher.launched_in.borrow().is_none());
}

#[test]
fn timeout_is_distinct_from_failure_and_aborts() {
    let dir = tempdir().unwrap();
    let timeout = StepOutcome::TimedOut {
        after: Duration::from_secs(300),
    };
    let runner = ScriptedRunner::new(vec![timeout.clone()]);
    let launcher = MockLauncher::exits(0);
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, _) = run_collecting(&p, &credentials());
    let outcome = result.unwrap();

    assert!(!outcome.is_success());
    assert_eq!(outcome.exit_code(), 1);
    assert!(matches!(
        outcome,
        Outcome::Aborted(AbortReason::StepFailed { outcome: StepOutcome::TimedOut { .. }, .. })
    ));
    assert_eq!(runner.ran(), vec!["Cloning repository".to_string()]);
}

#[test]
fn faulted_step_aborts_without_error() {
    let dir = tempdir().unwrap();
    let runner = ScriptedRunner::new(vec![StepOutcome::Faulted {
        message: "failed to start shell".to_string(),
    }]);
    let launcher = MockLauncher::exits(0);
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, _) = run_collecting(&p, &credentials());

    assert!(matches!(
        result.unwrap(),
        Outcome::Aborted(AbortReason::StepFailed { index: 0, .. })
    ));
}

#[test]
fn reset_runs_before_first_step() {
    let dir = tempdir().unwrap();
    let layout = Layout::under(dir.path());
    fs::create_dir_all(&layout.sample_data_dir).unwrap();
    fs::create_dir_all(&layout.install_dir).unwrap();
    fs::write(layout.install_dir.join("stale.txt"), "old").unwrap();

    let install_dir = layout.install_dir.clone();
    let mut runner = ScriptedRunner::all_succeed();
    runner.on_run = Some(Box::new(move |step: &Step| {
        if step.description == "Cloning repository" {
            assert!(!install_dir.exists(), "install dir must be gone before clone");
        }
    }));
    let launcher = MockLauncher::exits(0);
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, events) = run_collecting(&p, &credentials());

    assert!(result.unwrap().is_success());
    let removed: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ProvisionEvent::Removed(r) => Some(r.artifact),
            _ => None,
        })
        .collect();
    assert_eq!(removed, vec![Artifact::SampleData, Artifact::Installation]);
    assert!(!layout.sample_data_dir.exists());
}

#[test]
fn interrupted_step_reports_interrupt() {
    let dir = tempdir().unwrap();
    let runner = ScriptedRunner::new(vec![StepOutcome::Succeeded, StepOutcome::Interrupted]);
    let launcher = MockLauncher::exits(0);
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, events) = run_collecting(&p, &credentials());

    assert_eq!(result.unwrap(), Outcome::Aborted(AbortReason::Interrupted));
    assert_eq!(events.last(), Some(&ProvisionEvent::Interrupted));
    assert_eq!(runner.ran().len(), 2);
}

#[test]
fn cancel_flag_set_before_run_stops_after_validation() {
    let dir = tempdir().unwrap();
    let runner = ScriptedRunner::all_succeed();
    let launcher = MockLauncher::exits(0);
    let layout = Layout::under(dir.path());
    fs::create_dir_all(&layout.sample_data_dir).unwrap();
    let steps = acquisition_steps(&layout, &crate::config::PipelineConfig::default());
    let p = Provisioner::new(
        layout,
        steps,
        ProvisionOptions::default(),
        &runner,
        &launcher,
        Arc::new(AtomicBool::new(true)),
    );

    let (result, _) = run_collecting(&p, &credentials());

    assert_eq!(result.unwrap(), Outcome::Aborted(AbortReason::Interrupted));
    assert!(p.layout().sample_data_dir.exists());
    assert!(runner.ran().is_empty());
}

#[test]
fn bot_stopped_by_user_is_not_success() {
    let dir = tempdir().unwrap();
    let runner = ScriptedRunner::all_succeed();
    let launcher = MockLauncher {
        outcome: LaunchOutcome::StoppedByUser,
        launched_in: RefCell::new(None),
    };
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, _) = run_collecting(&p, &credentials());
    let outcome = result.unwrap();

    assert_eq!(outcome, Outcome::Launched(LaunchOutcome::StoppedByUser));
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn bot_non_zero_exit_still_counts_as_provisioned() {
    let dir = tempdir().unwrap();
    let runner = ScriptedRunner::all_succeed();
    let launcher = MockLauncher::exits(2);
    let p = provisioner(dir.path(), &runner, &launcher);

    let (result, _) = run_collecting(&p, &credentials());

    assert!(result.unwrap().is_success());
}

/// Succeeds every step, but the last one leaves a directory where the
/// credentials file should be written.
struct TamperingRunner {
    credentials_file: PathBuf,
}

impl CommandRunner for TamperingRunner {
    fn run(&self, step: &Step, _timeout: Duration) -> StepOutcome {
        if step.description == "Installing Python dependencies" {
            fs::create_dir_all(self.credentials_file.join("blocker")).unwrap();
        }
        StepOutcome::Succeeded
    }
}

#[test]
fn persistence_fault_propagates_as_error() {
    let dir = tempdir().unwrap();
    let layout = Layout::under(dir.path());
    let runner = TamperingRunner {
        credentials_file: layout.credentials_file.clone(),
    };
    let launcher = MockLauncher::exits(0);
    let steps = acquisition_steps(&layout, &crate::config::PipelineConfig::default());
    let p = Provisioner::new(
        layout,
        steps,
        ProvisionOptions::default(),
        runner,
        &launcher,
        Arc::new(AtomicBool::new(false)),
    );

    let (result, _) = run_collecting(&p, &credentials());

    assert!(matches!(result, Err(ProvisionError::Persistence { .. })));
    assert!(launcher.launched_in.borrow().is_none());
}

/// Run with a sink that rewrites `credentials.json` between save and verify.
fn run_with_file_replaced_after_save(
    strict_verify: bool,
) -> (ProvisionResult<Outcome>, Vec<ProvisionEvent>, Option<PathBuf>) {
    let dir = tempdir().unwrap();
    let layout = Layout::under(dir.path());
    let steps = acquisition_steps(&layout, &crate::config::PipelineConfig::default());
    let runner = ScriptedRunner::all_succeed();
    let launcher = MockLauncher::exits(0);
    let options = ProvisionOptions {
        strict_verify,
        ..ProvisionOptions::default()
    };
    let p = Provisioner::new(
        layout,
        steps,
        options,
        &runner,
        &launcher,
        Arc::new(AtomicBool::new(false)),
    );

    let other = Credentials::new(1, "ffff", "9:other", 7, 0);
    let mut events = Vec::new();
    let result = p.run(&credentials(), &mut |e: ProvisionEvent| {
        if let ProvisionEvent::CredentialsSaved { path } = &e {
            fs::write(path, to_json(&other).unwrap()).unwrap();
        }
        events.push(e);
    });
    let launched_in = launcher.launched_in.borrow().clone();
    (result, events, launched_in)
}

#[test]
fn verification_mismatch_warns_and_launches_by_default() {
    let (result, events, launched_in) = run_with_file_replaced_after_save(false);

    assert!(result.unwrap().is_success());
    assert!(events.iter().any(|e| matches!(
        e,
        ProvisionEvent::CredentialsVerified {
            verification: Verification::Mismatch,
            ..
        }
    )));
    assert!(launched_in.is_some());
}

#[test]
fn verification_mismatch_is_fatal_when_strict() {
    let (result, events, launched_in) = run_with_file_replaced_after_save(true);

    assert!(matches!(
        result,
        Err(ProvisionError::VerificationMismatch { .. })
    ));
    assert!(!events
        .iter()
        .any(|e| matches!(e, ProvisionEvent::HandoffStarting { .. })));
    assert!(launched_in.is_none());
}

#[test]
fn outcome_exit_codes() {
    assert_eq!(
        Outcome::Launched(LaunchOutcome::Exited { code: None }).exit_code(),
        0
    );
    assert_eq!(
        Outcome::Aborted(AbortReason::MissingCredentials(vec!["API_ID"])).exit_code(),
        1
    );
}
