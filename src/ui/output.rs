//! Output verbosity.

use serde::{Deserialize, Serialize};

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Normal output plus the resolved command line and exit code.
    Verbose,
    /// Status lines and the captured task output.
    #[default]
    Normal,
    /// Status lines only; captured output is hidden.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Check if this mode shows detail lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows captured command output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
