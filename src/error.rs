//! Error types for verification runs.
//!
//! This module defines [`VerifyError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `VerifyError` for failures the CLI maps to distinct exit codes
//! - Use `anyhow::Error` (via `VerifyError::Other`) for unexpected errors
//! - Every failure is fatal for the run; nothing is retried

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Core error type for verification runs.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The submission entry point could not be started.
    #[error("Failed to launch {program}: {source}")]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The submitted task did not finish within the configured timeout.
    #[error("Command timed out after {}s: {command}", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    /// The inspected output stream was empty.
    #[error("No output captured from {stream} to inspect")]
    NoOutput { stream: String },

    /// One or more expected markers were absent from the captured output.
    #[error("Expected output not found: {}", format_missing(.missing))]
    ExpectationMissing { missing: Vec<String> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VerifyError {
    /// Whether this error stems from configuration rather than the cluster.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
        )
    }
}

fn format_missing(missing: &[String]) -> String {
    missing
        .iter()
        .map(|m| format!("\"{}\"", m))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;
