//! Child process execution.
//!
//! Commands are described by an [`Invocation`]: an executable path plus an
//! explicit argument vector. Nothing is routed through a shell, so arguments
//! are passed to the child exactly as given, byte for byte.

use crate::error::{Result, VerifyError};
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

use super::platform::kill_process_group;

/// An executable and the arguments to start it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Path to the executable.
    pub program: PathBuf,

    /// Arguments, passed verbatim. Not required to be UTF-8.
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Create an invocation with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Value following `flag` in the argument list, if any.
    pub fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }

    /// Human-readable command line for logs and error messages.
    ///
    /// Non-UTF-8 bytes are shown lossily and arguments with whitespace or
    /// quotes are single-quoted. The result is never executed.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| quote(&part.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() {
        return "''".to_string();
    }
    if part
        .chars()
        .any(|c| c.is_whitespace() || c == '\'' || c == '"')
    {
        format!("'{}'", part.replace('\'', r"'\''"))
    } else {
        part.to_string()
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Maximum time to wait for the child (None = wait indefinitely).
    pub timeout: Option<Duration>,
}

/// Something that can run an [`Invocation`] to completion.
///
/// The verifier only talks to this trait so tests can substitute
/// [`MockRunner`](super::MockRunner) for real processes.
pub trait CommandRunner {
    /// Run the invocation, capturing both output streams.
    fn run(&self, invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult> {
        execute(invocation, options)
    }
}

/// Execute an invocation and capture its output.
///
/// Both pipes are drained on background threads while the child runs. On
/// Unix the child leads its own process group. When `options.timeout`
/// expires that whole group is killed and [`VerifyError::Timeout`] is
/// returned.
pub fn execute(invocation: &Invocation, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    tracing::debug!(command = %invocation.display(), "Spawning child process");

    let mut child = cmd.spawn().map_err(|source| VerifyError::LaunchFailed {
        program: invocation.program.clone(),
        source,
    })?;

    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());

    let status = match options.timeout {
        Some(timeout) => match child.wait_timeout(timeout)? {
            Some(status) => status,
            None => {
                tracing::warn!(
                    pid = child.id(),
                    "Child exceeded {}s timeout, killing its process group",
                    timeout.as_secs()
                );
                if !kill_process_group(child.id()) {
                    let _ = child.kill();
                }
                let _ = child.wait();
                // Readers stay detached: a descendant that left the group
                // may still hold the pipes open.
                return Err(VerifyError::Timeout {
                    command: invocation.display(),
                    timeout,
                });
            }
        },
        None => child.wait()?,
    };

    let stdout = collect(stdout_handle);
    let stderr = collect(stderr_handle);
    let duration = start.elapsed();

    tracing::debug!(
        exit_code = ?status.code(),
        stdout_bytes = stdout.len(),
        stderr_bytes = stderr.len(),
        "Child process exited"
    );

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
