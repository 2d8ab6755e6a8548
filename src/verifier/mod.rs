//! End-to-end cluster verification.
//!
//! A [`Verifier`] locates the versioned installation, submits the sample
//! ingestion task through the installation's submission entry point, and
//! checks the captured output for the configured success markers.
//!
//! # Example
//!
//! ```
//! use druid_verify::config::{VerifierConfig, LOAD_COMPLETE_MARKER, TASK_SUCCESS_MARKER};
//! use druid_verify::shell::MockRunner;
//! use druid_verify::ui::MockUI;
//! use druid_verify::verifier::Verifier;
//!
//! let stderr = format!("{}\n{}", TASK_SUCCESS_MARKER, LOAD_COMPLETE_MARKER);
//! let verifier = Verifier::with_runner(
//!     VerifierConfig::default(),
//!     MockRunner::with_output("ok", &stderr),
//! );
//!
//! let mut ui = MockUI::new();
//! let report = verifier.run(&mut ui).unwrap();
//! assert!(report.passed);
//! assert!(ui.has_success("Success"));
//! ```

pub mod check;
pub mod report;

pub use check::{inspect, inspected_text, Inspection};
pub use report::VerificationReport;

use std::path::{Path, PathBuf};

use crate::config::VerifierConfig;
use crate::error::Result;
use crate::shell::{CommandOptions, CommandResult, CommandRunner, Invocation, SystemRunner};
use crate::ui::{format_duration, UserInterface};

/// Flag the submission entry point takes the task descriptor under.
pub const FILE_FLAG: &str = "--file";

/// Drives one verification run against a single installation.
pub struct Verifier<R = SystemRunner> {
    config: VerifierConfig,
    runner: R,
}

impl Verifier<SystemRunner> {
    /// Create a verifier that spawns real processes.
    pub fn new(config: VerifierConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> Verifier<R> {
    /// Create a verifier with a custom command runner.
    pub fn with_runner(config: VerifierConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Get the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Versioned installation directory, e.g.
    /// `/opt/druid/apache-druid-0.13.0-incubating`.
    ///
    /// Pure path construction; the filesystem is not consulted.
    pub fn locate_installation(&self) -> PathBuf {
        let install = &self.config.installation;
        install.root.join(install.dir_name())
    }

    /// The submission command for `installation`: the entry point followed
    /// by `--file <descriptor>`, both anchored inside the installation.
    pub fn task_invocation(&self, installation: &Path) -> Invocation {
        let task = &self.config.task;
        Invocation::new(installation.join(&task.entry_point))
            .arg(FILE_FLAG)
            .arg(installation.join(&task.descriptor))
    }

    /// Submit the sample task and wait for the submission tool to exit.
    ///
    /// Blocks until the child exits or the configured timeout expires.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if the entry point cannot be started and
    /// `Timeout` if it outlives the configured timeout.
    pub fn submit_sample_task(&self, installation: &Path) -> Result<CommandResult> {
        let invocation = self.task_invocation(installation);
        let options = CommandOptions {
            timeout: self.config.task.timeout(),
        };

        tracing::info!(command = %invocation.display(), "Submitting sample task");
        self.runner.run(&invocation, &options)
    }

    /// Run the check and return its report, passed or not.
    ///
    /// Prints captured stdout and stderr when non-empty; verbose output also
    /// shows the resolved command line and exit code. Only launch,
    /// timeout, and empty-output failures are returned as errors; missing
    /// markers are recorded in the report.
    pub fn execute(&self, ui: &mut dyn UserInterface) -> Result<VerificationReport> {
        ui.message("Starting test for Druid");

        let installation = self.locate_installation();
        let command = self.task_invocation(&installation).display();
        tracing::debug!(installation = %installation.display(), "Resolved installation");
        ui.detail(&format!("Installation: {}", installation.display()));
        ui.detail(&format!("Command: {}", command));

        let mut spinner = ui.start_spinner("Waiting for the sample ingestion task...");
        let result = match self.submit_sample_task(&installation) {
            Ok(result) => {
                spinner.finish_success(&format!(
                    "Task submission finished in {}",
                    format_duration(result.duration)
                ));
                result
            }
            Err(e) => {
                spinner.finish_error("Task submission failed");
                return Err(e);
            }
        };

        let code = result
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        ui.detail(&format!("Exit code: {}", code));

        if !result.stdout.is_empty() {
            ui.command_output("stdout", &result.stdout);
        }
        if !result.stderr.is_empty() {
            ui.command_output("stderr", &result.stderr);
        }

        // The submission tool's exit status is informational only.
        if !result.success {
            tracing::debug!("Submission tool exited with {}", code);
            ui.warning(&format!("Submission tool exited with {}", code));
        }

        let inspection = inspect(&result, &self.config.check)?;

        Ok(VerificationReport::new(
            installation,
            command,
            result.exit_code,
            result.duration.as_millis() as u64,
            inspection,
        ))
    }

    /// Run the check end to end, printing `Success` when every marker is found.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// `ExpectationMissing` when a marker is absent.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<VerificationReport> {
        let report = self.execute(ui)?;
        report.ensure_passed()?;
        ui.success("Success");
        Ok(report)
    }
}
