//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for resolving configuration and routing subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::config::{load_config, validate, LoadedConfig};
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

/// Exit code for configuration problems.
pub const CONFIG_ERROR_EXIT_CODE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher; `working_dir` is searched for `druid-verify.yml`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Load the config file (if any) and apply command-line overrides.
    ///
    /// The `config` command shows unvalidated configuration so problems
    /// can be inspected; every other command requires it to validate.
    pub fn resolve_config(&self, cli: &Cli) -> Result<LoadedConfig> {
        let mut loaded = load_config(cli.config.as_deref(), &self.working_dir)?;
        cli.overrides().apply(&mut loaded.config);

        if !matches!(cli.command, Some(Commands::Config(_))) {
            validate(&loaded.config)?;
        }

        Ok(loaded)
    }

    /// Dispatch and execute a command.
    ///
    /// Configuration errors are reported through `ui` and mapped to
    /// [`CONFIG_ERROR_EXIT_CODE`]; everything else is returned to the caller.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let loaded = match self.resolve_config(cli) {
            Ok(loaded) => loaded,
            Err(e) if e.is_config_error() => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(CONFIG_ERROR_EXIT_CODE));
            }
            Err(e) => return Err(e),
        };

        // Apply config default_output when no CLI flag was explicitly set
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(loaded.config.settings.default_output);
        }

        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(loaded.config, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Locate(args)) => {
                let cmd = super::locate::LocateCommand::new(loaded.config, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Config(args)) => {
                let cmd = super::config::ConfigCommand::new(loaded, args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to run command with default args
                let cmd = super::run::RunCommand::new(loaded.config, RunArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
