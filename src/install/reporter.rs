use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget};
use std::time::Duration;

/// One resolution attempt, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionEntry {
    pub name: String,
    pub succeeded: bool,
}

/// Ordered, append-only record of per-dependency resolution outcomes.
///
/// Feeds the running status line and, after the run, the decision whether
/// the process should exit non-zero. Lifetime is one run.
#[derive(Debug, Clone, Default)]
pub struct DetectionLedger {
    entries: Vec<DetectionEntry>,
}

impl DetectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str, succeeded: bool) {
        self.entries.push(DetectionEntry {
            name: name.to_string(),
            succeeded,
        });
    }

    pub fn entries(&self) -> &[DetectionEntry] {
        &self.entries
    }

    pub fn failed_any(&self) -> bool {
        self.entries.iter().any(|entry| !entry.succeeded)
    }

    /// Render the comma-joined status line. Failed entries are red in
    /// whitelist mode; during autodiscovery they are expected noise and
    /// rendered dimmed instead.
    pub fn render(&self, skip_failures: bool) -> String {
        self.entries
            .iter()
            .map(|entry| {
                if entry.succeeded {
                    entry.name.green().to_string()
                } else if skip_failures {
                    entry.name.dimmed().to_string()
                } else {
                    entry.name.red().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Spinner-based progress output for one install run.
pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner.set_message("resolving dependencies");
        Self { spinner }
    }

    /// A reporter that renders nothing. Used by tests.
    pub fn hidden() -> Self {
        let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        Self { spinner }
    }

    /// Refresh the spinner with the ledger's current status line.
    pub fn update(&self, ledger: &DetectionLedger, skip_failures: bool) {
        self.spinner.set_message(ledger.render(skip_failures));
    }

    /// Log a non-fatal error above the spinner.
    pub fn log_error(&self, message: &str) {
        self.spinner
            .println(format!("{} {}", "✗".red(), message.red()));
    }

    /// Log a dimmed hint line above the spinner.
    pub fn log_hint(&self, hint: &str) {
        self.spinner.println(format!("  {}", hint.dimmed()));
    }

    /// Finish the spinner with a success summary.
    pub fn succeed(&self, message: &str) {
        self.spinner
            .finish_with_message(format!("{} {}", "✓".green(), message));
    }

    /// Clear the spinner without a summary; the caller renders the failure.
    pub fn abandon(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
