//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! returns a canned response and records every invocation it receives.
//!
//! # Example
//!
//! ```
//! use druid_verify::shell::{CommandOptions, CommandRunner, Invocation, MockRunner};
//!
//! let runner = MockRunner::with_output("ok", "Task finished with status: SUCCESS");
//! let result = runner
//!     .run(&Invocation::new("post-index-task"), &CommandOptions::default())
//!     .unwrap();
//!
//! assert_eq!(result.stdout, "ok");
//! assert_eq!(runner.invocations().len(), 1);
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::{Result, VerifyError};

use super::command::{CommandOptions, CommandResult, CommandRunner, Invocation};

#[derive(Debug, Clone)]
enum MockResponse {
    Output(CommandResult),
    LaunchFailure,
    Timeout,
}

/// Command runner that never spawns a process.
#[derive(Debug)]
pub struct MockRunner {
    response: MockResponse,
    invocations: RefCell<Vec<(Invocation, CommandOptions)>>,
}

impl MockRunner {
    /// Respond with a successful exit and the given streams.
    pub fn with_output(stdout: &str, stderr: &str) -> Self {
        Self::with_result(CommandResult::success(
            stdout.to_string(),
            stderr.to_string(),
            Duration::from_millis(1),
        ))
    }

    /// Respond with an arbitrary result.
    pub fn with_result(result: CommandResult) -> Self {
        Self::respond(MockResponse::Output(result))
    }

    /// Fail every run as if the executable did not exist.
    pub fn launch_failure() -> Self {
        Self::respond(MockResponse::LaunchFailure)
    }

    /// Fail every run as if the timeout had expired.
    pub fn timeout() -> Self {
        Self::respond(MockResponse::Timeout)
    }

    fn respond(response: MockResponse) -> Self {
        Self {
            response,
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// Invocations received so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .borrow()
            .iter()
            .map(|(inv, _)| inv.clone())
            .collect()
    }

    /// Options passed with the most recent invocation.
    pub fn last_options(&self) -> Option<CommandOptions> {
        self.invocations
            .borrow()
            .last()
            .map(|(_, opts)| opts.clone())
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult> {
        self.invocations
            .borrow_mut()
            .push((invocation.clone(), options.clone()));

        match &self.response {
            MockResponse::Output(result) => Ok(result.clone()),
            MockResponse::LaunchFailure => Err(VerifyError::LaunchFailed {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock: not found"),
            }),
            MockResponse::Timeout => Err(VerifyError::Timeout {
                command: invocation.display(),
                timeout: options.timeout.unwrap_or_default(),
            }),
        }
    }
}
