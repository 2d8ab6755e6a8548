//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use druid_verify::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! // Use ui in code under test...
//! ui.message("Starting test for Druid");
//! ui.success("Success");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Starting test"));
//! assert!(ui.successes().contains(&"Success".to_string()));
//! ```

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    details: Vec<String>,
    outputs: Vec<(String, String)>,
    documents: Vec<String>,
    spinners: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured command output blocks as (label, text).
    pub fn outputs(&self) -> &[(String, String)] {
        &self.outputs
    }

    /// Get all documents written, in order.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific detail line was shown.
    pub fn has_detail(&self, msg: &str) -> bool {
        self.details.iter().any(|m| m.contains(msg))
    }

    /// Check if a command output block with this label was shown.
    pub fn has_output(&self, label: &str) -> bool {
        self.outputs.iter().any(|(l, _)| l == label)
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn detail(&mut self, msg: &str) {
        self.details.push(msg.to_string());
    }

    fn command_output(&mut self, label: &str, text: &str) {
        self.outputs.push((label.to_string(), text.to_string()));
    }

    fn document(&mut self, text: &str) {
        self.documents.push(text.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::default())
    }
}

/// Mock spinner that records how it finished.
#[derive(Debug, Default)]
pub struct MockSpinner {
    /// Final message, prefixed with `ok:` or `err:`.
    pub finished: Option<String>,
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.finished = Some(format!("ok:{}", msg));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finished = Some(format!("err:{}", msg));
    }
}
