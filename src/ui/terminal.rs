//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, NonInteractiveUI, OutputMode, ProgressSpinner, SpinnerHandle,
    UserInterface, VerifyTheme,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: VerifyTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            VerifyTheme::new()
        } else {
            VerifyTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        Term::stderr()
            .write_line(&self.theme.format_error(msg))
            .ok();
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.term, "{}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn command_output(&mut self, label: &str, text: &str) {
        if !self.mode.shows_command_output() {
            return;
        }
        writeln!(self.term, "{}", self.theme.dim.apply_to(format!("── {} ──", label))).ok();
        for line in text.lines() {
            writeln!(self.term, "{}", self.theme.output.apply_to(line)).ok();
        }
    }

    fn document(&mut self, text: &str) {
        writeln!(self.term, "{}", text).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
