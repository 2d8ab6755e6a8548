//! Locate command implementation.
//!
//! The `druid-verify locate` command shows where the installation is
//! expected and what would be submitted, without running anything.

use crate::cli::args::LocateArgs;
use crate::config::VerifierConfig;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::verifier::{Verifier, FILE_FLAG};

use super::dispatcher::{Command, CommandResult};

/// The locate command implementation.
pub struct LocateCommand {
    verifier: Verifier,
    args: LocateArgs,
}

impl LocateCommand {
    /// Create a new locate command.
    pub fn new(config: VerifierConfig, args: LocateArgs) -> Self {
        Self {
            verifier: Verifier::new(config),
            args,
        }
    }
}

impl Command for LocateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let installation = self.verifier.locate_installation();
        let invocation = self.verifier.task_invocation(&installation);

        ui.message(&format!("Installation: {}", installation.display()));
        ui.message(&format!("Command:      {}", invocation.display()));

        if !self.args.check {
            return Ok(CommandResult::success());
        }

        let descriptor = invocation
            .flag_value(FILE_FLAG)
            .map(std::path::PathBuf::from);
        let checks = [
            ("installation", Some(installation.clone()), true),
            ("entry point", Some(invocation.program.clone()), false),
            ("task descriptor", descriptor, false),
        ];

        let mut missing = 0;
        for (label, path, is_dir) in checks {
            let Some(path) = path else { continue };
            let present = if is_dir {
                path.is_dir()
            } else {
                path.is_file()
            };
            if present {
                ui.success(&format!("{} found: {}", label, path.display()));
            } else {
                ui.error(&format!("{} missing: {}", label, path.display()));
                missing += 1;
            }
        }

        tracing::debug!(missing, "Installation layout checked");

        if missing == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
