//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::VerifyTheme;
use super::SpinnerHandle;

/// A spinner shown while the submitted task runs.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: VerifyTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: VerifyTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.magenta} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't show (for silent mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: VerifyTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

/// Spinner for non-terminal output: nothing to animate or clear.
pub struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}
