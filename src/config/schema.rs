//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `druid-verify.yml` file format. Every field has a default, so an empty
//! file (or no file at all) describes the stock quickstart install.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::ui::OutputMode;

/// Marker printed by the submission tool when the indexing task succeeds.
pub const TASK_SUCCESS_MARKER: &str = "Task finished with status: SUCCESS";

/// Marker printed once the sample datasource is queryable.
pub const LOAD_COMPLETE_MARKER: &str = "wikipedia loading complete! You may now query your data";

/// Root configuration structure for druid-verify.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Where the toolkit is installed
    pub installation: InstallationConfig,

    /// What gets submitted
    pub task: TaskConfig,

    /// How the captured output is judged
    pub check: CheckConfig,

    /// Display settings
    pub settings: Settings,
}

/// Location of the toolkit on disk.
///
/// The installation directory is `<root>/<distribution>-<version>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallationConfig {
    /// Parent directory holding versioned installs
    pub root: PathBuf,

    /// Distribution name prefix of the install directory
    pub distribution: String,

    /// Exact installed version
    pub version: String,
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/opt/druid"),
            distribution: "apache-druid".to_string(),
            version: "0.13.0-incubating".to_string(),
        }
    }
}

impl InstallationConfig {
    /// Name of the versioned install directory, e.g. `apache-druid-0.13.0-incubating`.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.distribution, self.version)
    }
}

/// The sample task submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    /// Submission executable, relative to the installation directory
    pub entry_point: PathBuf,

    /// Task descriptor, relative to the installation directory
    pub descriptor: PathBuf,

    /// Seconds to wait for the task (0 or null waits forever)
    pub timeout_secs: Option<u64>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            entry_point: PathBuf::from("bin/post-index-task"),
            descriptor: PathBuf::from("quickstart/tutorial/wikipedia-index.json"),
            timeout_secs: Some(default_timeout_secs()),
        }
    }
}

impl TaskConfig {
    /// Effective timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }
}

fn default_timeout_secs() -> u64 {
    600
}

/// Which captured stream(s) are inspected for the markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSource {
    /// stdout and stderr together
    #[default]
    Either,
    /// stderr only
    Stderr,
}

impl OutputSource {
    /// Label used in messages and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Either => "stdout+stderr",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for OutputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Substrings that must all appear in the inspected output
    pub expected_markers: Vec<String>,

    /// Stream(s) to inspect
    pub output_source: OutputSource,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            expected_markers: vec![
                TASK_SUCCESS_MARKER.to_string(),
                LOAD_COMPLETE_MARKER.to_string(),
            ],
            output_source: OutputSource::default(),
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output mode used when no CLI flag picks one
    pub default_output: OutputMode,
}
