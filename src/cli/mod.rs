//! Command-line interface.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigArgs, LocateArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
