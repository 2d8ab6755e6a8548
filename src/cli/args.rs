//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigOverrides, OutputSource};

/// Submit the sample ingestion task to a local Druid install and check it succeeds.
#[derive(Debug, Parser)]
#[command(name = "druid-verify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (defaults to ./druid-verify.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding versioned installs (overrides installation.root)
    #[arg(long, global = true, env = "DRUID_VERIFY_INSTALL_ROOT")]
    pub install_root: Option<PathBuf>,

    /// Exact installed version (overrides installation.version)
    #[arg(long, global = true, env = "DRUID_VERIFY_VERSION")]
    pub druid_version: Option<String>,

    /// Seconds to wait for the task, 0 to wait forever (overrides task.timeout_secs)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config overrides taken from the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        let output_source = match &self.command {
            Some(Commands::Run(args)) if args.stderr_only => Some(OutputSource::Stderr),
            _ => None,
        };

        ConfigOverrides {
            install_root: self.install_root.clone(),
            version: self.druid_version.clone(),
            timeout_secs: self.timeout,
            output_source,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit the sample task and check its output (default if no command specified)
    Run(RunArgs),

    /// Show the installation path and the command that would be submitted
    Locate(LocateArgs),

    /// Show resolved configuration
    Config(ConfigArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Print the verification report as JSON
    #[arg(long)]
    pub json: bool,

    /// Only inspect stderr for the success markers
    #[arg(long)]
    pub stderr_only: bool,
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LocateArgs {
    /// Also check that the entry point and task descriptor exist
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_args_has_no_command() {
        let cli = Cli::parse_from(["druid-verify"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::parse_from(["druid-verify", "run", "--json", "--stderr-only"]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.json);
                assert!(args.stderr_only);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "druid-verify",
            "locate",
            "--install-root",
            "/srv/druid",
            "--druid-version",
            "0.14.0",
            "--timeout",
            "30",
        ]);
        assert_eq!(cli.install_root, Some(PathBuf::from("/srv/druid")));
        assert_eq!(cli.druid_version.as_deref(), Some("0.14.0"));
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn overrides_carry_cli_values() {
        let cli = Cli::parse_from([
            "druid-verify",
            "--druid-version",
            "0.15.0",
            "run",
            "--stderr-only",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.version.as_deref(), Some("0.15.0"));
        assert_eq!(overrides.output_source, Some(OutputSource::Stderr));
        assert!(overrides.install_root.is_none());
    }

    #[test]
    fn stderr_only_absent_leaves_source_unset() {
        let cli = Cli::parse_from(["druid-verify", "run"]);
        assert!(cli.overrides().output_source.is_none());
    }
}
