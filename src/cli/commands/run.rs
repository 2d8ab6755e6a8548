//! Run command implementation.
//!
//! The `druid-verify run` command submits the sample task and checks its
//! output. It is also what runs when no subcommand is given.

use crate::cli::args::RunArgs;
use crate::config::VerifierConfig;
use crate::error::{Result, VerifyError};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::{OutputMode, UserInterface};
use crate::verifier::Verifier;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand<R = SystemRunner> {
    verifier: Verifier<R>,
    args: RunArgs,
}

impl RunCommand<SystemRunner> {
    /// Create a new run command that spawns the real submission tool.
    pub fn new(config: VerifierConfig, args: RunArgs) -> Self {
        Self::with_runner(config, args, SystemRunner)
    }
}

impl<R: CommandRunner> RunCommand<R> {
    /// Create a run command with a custom command runner.
    pub fn with_runner(config: VerifierConfig, args: RunArgs, runner: R) -> Self {
        Self {
            verifier: Verifier::with_runner(config, runner),
            args,
        }
    }

    fn execute_json(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Keep stdout clean for the JSON document.
        let mode = ui.output_mode();
        ui.set_output_mode(OutputMode::Silent);
        let outcome = self.verifier.execute(ui);
        ui.set_output_mode(mode);

        let report = outcome?;
        let json =
            serde_json::to_string_pretty(&report).map_err(|e| VerifyError::Other(e.into()))?;
        ui.document(&json);

        report.ensure_passed()?;
        Ok(CommandResult::success())
    }
}

impl<R: CommandRunner> Command for RunCommand<R> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.json {
            return self.execute_json(ui);
        }

        self.verifier.run(ui)?;
        Ok(CommandResult::success())
    }
}
