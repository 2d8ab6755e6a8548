//! Non-interactive UI for CI/headless environments.

use super::spinner::NoopSpinner;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Prints plain lines with no styling. Instead of a spinner, the task start
/// and finish are each reported on their own line so CI logs stay readable.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            println!("{}", msg);
        }
    }

    fn command_output(&mut self, _label: &str, text: &str) {
        if self.mode.shows_command_output() {
            println!("{}", text.trim_end_matches('\n'));
        }
    }

    fn document(&mut self, text: &str) {
        println!("{}", text);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("{}", message);
        }
        Box::new(NoopSpinner)
    }
}
