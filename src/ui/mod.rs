//! User interface components.
//!
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use vskit::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Environment check");
//! ui.success("All dependencies verified");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, VskitTheme};

use crate::requirements::{CheckReport, CheckResult, Classification};

/// Trait for user interface interactions.
///
/// Commands only talk to this trait so tests can substitute [`MockUI`].
pub trait UserInterface {
    /// Current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Plain message.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Contextual hint, e.g. a remediation command.
    fn show_hint(&mut self, hint: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Whether a human is at the terminal.
    fn is_interactive(&self) -> bool;

    /// Show one check result. OK lines are suppressed below normal verbosity.
    fn show_check(&mut self, result: &CheckResult) {
        let line = format_check_line(result);
        match result.classification {
            Classification::Ok => {
                if self.output_mode().shows_details() {
                    self.success(&line)
                }
            }
            Classification::Warn => self.warning(&line),
            Classification::Error => self.error(&line),
        }
    }

    /// Show every result of a report followed by its overall status.
    fn show_report(&mut self, report: &CheckReport) {
        for result in report.results() {
            self.show_check(result);
        }
        let summary = format!(
            "Overall: {} ({} error(s), {} warning(s))",
            report.status(),
            report.errors().count(),
            report.warnings().count()
        );
        match report.status() {
            Classification::Ok => self.success(&summary),
            Classification::Warn => self.warning(&summary),
            Classification::Error => self.error(&summary),
        }
    }
}

/// `name version: message`, or `name: message` when not installed.
pub fn format_check_line(result: &CheckResult) -> String {
    match &result.version {
        Some(version) => format!("{} {}: {}", result.library, version, result.message),
        None => format!("{}: {}", result.library, result.message),
    }
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}
