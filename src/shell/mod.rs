//! Child process execution.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult, CommandRunner, Invocation, SystemRunner};
pub use mock::MockRunner;
pub use platform::{is_ci, kill_process_group};
