//! Config command implementation.
//!
//! The `druid-verify config` command shows resolved configuration. It is
//! written as a document, so a `silent` default output does not hide it.

use crate::cli::args::ConfigArgs;
use crate::config::LoadedConfig;
use crate::error::{Result, VerifyError};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    loaded: LoadedConfig,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(loaded: LoadedConfig, args: ConfigArgs) -> Self {
        Self { loaded, args }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = &self.loaded.config;

        if self.args.json {
            let json =
                serde_json::to_string_pretty(config).map_err(|e| VerifyError::Other(e.into()))?;
            ui.document(&json);
            return Ok(CommandResult::success());
        }

        let source = match &self.loaded.source {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        };
        let yaml = serde_yaml::to_string(config).map_err(|e| VerifyError::Other(e.into()))?;
        ui.document(&format!("# {}\n{}", source, yaml.trim_end()));

        Ok(CommandResult::success())
    }
}
