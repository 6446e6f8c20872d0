//! Console rendering of provisioning progress

use std::io::Write;
use std::sync::PoisonError;

use leechup::provision::{
    AbortReason, LaunchOutcome, Outcome, ProgressSink, ProvisionEvent, Step, StepOutcome,
    Verification,
};

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::context::UiContext;
use crate::ui::indicator::{clear_line, Indicator, SharedWriter, SPIN_INTERVAL, STOP_GRACE};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

const SETUP_MESSAGE: &str = "Setting up environment";

/// Trailing stderr lines shown for a failed step below `-vv`.
const STDERR_TAIL_LINES: usize = 20;

/// Prints pipeline events as icon-prefixed lines and drives the spinner.
pub struct ConsoleReporter<W: Write + Send + 'static> {
    out: SharedWriter<W>,
    ui: UiContext,
    indicator: Option<Indicator>,
}

impl<W: Write + Send + 'static> ConsoleReporter<W> {
    pub fn new(out: SharedWriter<W>, ui: UiContext) -> Self {
        Self {
            out,
            ui,
            indicator: None,
        }
    }

    /// Stop the spinner and print the closing line for `outcome`.
    pub fn finish(&mut self, outcome: &Outcome) {
        self.stop_indicator();
        let lines = render_outcome(outcome, &self.ui);
        self.write_lines(&lines);
    }

    fn start_indicator(&mut self) {
        if self.indicator.is_some() {
            return;
        }
        self.indicator = Some(Indicator::start(
            self.out.clone(),
            format!("{}...", SETUP_MESSAGE),
            self.ui.unicode,
            SPIN_INTERVAL,
        ));
    }

    fn stop_indicator(&mut self) {
        if let Some(indicator) = self.indicator.take() {
            // A stuck spinner must not hold up the handoff.
            let _ = indicator.stop(STOP_GRACE);
        }
    }

    fn write_lines(&self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let mut w = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if self.indicator.is_some() {
            let _ = clear_line(&mut *w);
        }
        for line in lines {
            let _ = writeln!(w, "{}", line);
        }
        let _ = w.flush();
    }
}

impl<W: Write + Send + 'static> ProgressSink for ConsoleReporter<W> {
    fn emit(&mut self, event: ProvisionEvent) {
        match &event {
            ProvisionEvent::Started if self.ui.animation => self.start_indicator(),
            ProvisionEvent::HandoffStarting { .. } | ProvisionEvent::Interrupted => {
                self.stop_indicator()
            }
            _ => {}
        }
        let lines = render_event(&event, &self.ui);
        self.write_lines(&lines);
    }
}

impl<W: Write + Send + 'static> Drop for ConsoleReporter<W> {
    fn drop(&mut self) {
        self.stop_indicator();
    }
}

fn icon_line(ui: &UiContext, icon: Icon, text: impl AsRef<str>) -> String {
    format!("{} {}", icon.colored(ui.color, ui.unicode), text.as_ref())
}

fn detail_line(ui: &UiContext, text: impl AsRef<str>) -> String {
    let arrow = Icon::Arrow.colored(ui.color, ui.unicode);
    format!("  {} {}", arrow, ColoredText::dim(text.as_ref()).render(ui.color))
}

/// Console lines for one event.
pub fn render_event(event: &ProvisionEvent, ui: &UiContext) -> Vec<String> {
    let verbose = ui.verbose > 0;
    match event {
        ProvisionEvent::CredentialsMissing { fields } => vec![icon_line(
            ui,
            Icon::Error,
            format!(
                "Please fill in all required credentials (missing: {})",
                fields.join(", ")
            ),
        )],
        ProvisionEvent::Started => {
            let mut lines = Vec::new();
            if !ui.animation {
                lines.push(format!("{}...", SETUP_MESSAGE));
            }
            lines.push(icon_line(ui, Icon::Clean, "Cleaning up environment..."));
            lines
        }
        ProvisionEvent::Removed(removed) => {
            let mut lines = vec![icon_line(
                ui,
                Icon::Success,
                format!("Removed {}", removed.artifact.label()),
            )];
            if verbose {
                lines.push(detail_line(ui, removed.path.display().to_string()));
            }
            lines
        }
        ProvisionEvent::StepStarted { index, total, step } => {
            let counter = ColoredText::dim(format!("[{}/{}]", index + 1, total)).render(ui.color);
            let mut lines = vec![icon_line(
                ui,
                Icon::Package,
                format!("{} {}...", counter, step.description),
            )];
            if verbose {
                lines.push(detail_line(ui, &step.command));
            }
            lines
        }
        ProvisionEvent::StepFinished { step, outcome, .. } => render_step_outcome(step, outcome, ui),
        ProvisionEvent::CredentialsSaved { path } => {
            let mut lines = vec![icon_line(ui, Icon::Success, "Credentials saved successfully")];
            if verbose {
                lines.push(detail_line(ui, path.display().to_string()));
            }
            lines
        }
        ProvisionEvent::CredentialsVerified { verification, .. } => match verification {
            Verification::Match => vec![icon_line(ui, Icon::Success, "Credentials verified")],
            Verification::Mismatch => vec![icon_line(
                ui,
                Icon::Warning,
                ColoredText::warning("Credentials verification failed").render(ui.color),
            )],
        },
        ProvisionEvent::HandoffStarting {
            install_dir,
            command,
        } => {
            let mut lines = vec![
                String::new(),
                icon_line(
                    ui,
                    Icon::Done,
                    ColoredText::success("Setup completed successfully!")
                        .bold()
                        .render(ui.color),
                ),
                icon_line(ui, Icon::Launch, "Starting Telegram Leech Bot..."),
            ];
            if verbose {
                lines.push(detail_line(
                    ui,
                    format!("{} (in {})", command, install_dir.display()),
                ));
            }
            lines
        }
        ProvisionEvent::BotExited(LaunchOutcome::Exited { code: Some(0) }) => {
            vec![icon_line(ui, Icon::Success, "Bot exited")]
        }
        ProvisionEvent::BotExited(LaunchOutcome::Exited { code: Some(code) }) => vec![icon_line(
            ui,
            Icon::Warning,
            format!("Bot exited with status {}", code),
        )],
        ProvisionEvent::BotExited(LaunchOutcome::Exited { code: None }) => {
            vec![icon_line(ui, Icon::Warning, "Bot was terminated by a signal")]
        }
        ProvisionEvent::BotExited(LaunchOutcome::StoppedByUser) => {
            vec![String::new(), icon_line(ui, Icon::Stop, "Bot stopped by user")]
        }
        ProvisionEvent::Interrupted => vec![
            String::new(),
            icon_line(ui, Icon::Stop, "Setup interrupted by user"),
        ],
    }
}

fn render_step_outcome(step: &Step, outcome: &StepOutcome, ui: &UiContext) -> Vec<String> {
    match outcome {
        StepOutcome::Succeeded => vec![icon_line(
            ui,
            Icon::Success,
            format!("{} completed successfully", step.description),
        )],
        StepOutcome::Failed { code, stderr } => {
            let status = match code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            };
            let mut block = ErrorBlock::new(format!("Error in {} ({})", step.description, status));
            let lines: Vec<&str> = stderr.lines().collect();
            if ui.verbose >= 2 || lines.len() <= STDERR_TAIL_LINES {
                block = block.with_details(lines);
            } else {
                let skipped = lines.len() - STDERR_TAIL_LINES;
                block = block
                    .with_details([format!("... {} earlier lines (-vv shows all)", skipped)])
                    .with_details(lines[skipped..].iter().copied());
            }
            let block = block.with_fix(format!("Run it by hand: {}", step.command));
            split_block(block.render(ui.color, ui.unicode))
        }
        StepOutcome::TimedOut { after } => vec![icon_line(
            ui,
            Icon::Timeout,
            ColoredText::warning(format!(
                "Timeout during {} (after {}s)",
                step.description,
                after.as_secs()
            ))
            .render(ui.color),
        )],
        StepOutcome::Faulted { message } => vec![icon_line(
            ui,
            Icon::Error,
            format!("Unexpected error during {}: {}", step.description, message),
        )],
        StepOutcome::Interrupted => Vec::new(),
    }
}

/// Closing line for a finished run.
pub fn render_outcome(outcome: &Outcome, ui: &UiContext) -> Vec<String> {
    match outcome {
        Outcome::Aborted(AbortReason::StepFailed { index, step, .. }) => vec![icon_line(
            ui,
            Icon::Error,
            ColoredText::error(format!(
                "Setup failed at step {}: {}",
                index + 1,
                step.description
            ))
            .render(ui.color),
        )],
        Outcome::Aborted(AbortReason::MissingCredentials(_))
        | Outcome::Aborted(AbortReason::Interrupted)
        | Outcome::Launched(_) => Vec::new(),
    }
}

fn split_block(rendered: String) -> Vec<String> {
    rendered.lines().map(str::to_string).collect()
}
