//! Visual theme and styling.

use console::Style;

/// Terminal styles used by [`TerminalUI`](super::TerminalUI).
#[derive(Debug, Clone)]
pub struct VerifyTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for captured command output (dim).
    pub output: Style,
}

impl Default for VerifyTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl VerifyTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            output: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            output: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
