//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves the
//! configuration once and routes the subcommand to its implementation.

pub mod config;
pub mod dispatcher;
pub mod locate;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
