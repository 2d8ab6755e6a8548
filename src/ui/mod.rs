//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! Diagnostics go through `tracing`; everything meant for the person running
//! the check goes through a `UserInterface`.
//!
//! # Example
//!
//! ```
//! use druid_verify::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.detail("only shown in verbose mode");
//! ui.success("Success");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, VerifyTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a status line only shown in verbose mode.
    fn detail(&mut self, msg: &str);

    /// Show text captured from a child process stream.
    fn command_output(&mut self, label: &str, text: &str);

    /// Write a machine-readable document to stdout.
    ///
    /// Unlike every other method this ignores the output mode: a requested
    /// document is always written.
    fn document(&mut self, text: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}
