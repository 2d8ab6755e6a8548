//! Serializable summary of a verification run.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::error::{Result, VerifyError};

use super::check::Inspection;

/// Outcome of one verification run, printed by `run --json`.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    #[serde(serialize_with = "lossy_path")]
    pub installation: PathBuf,
    pub command: String,
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    pub inspected: String,
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub passed: bool,
}

impl VerificationReport {
    pub(crate) fn new(
        installation: PathBuf,
        command: String,
        exit_code: Option<i32>,
        duration_ms: u64,
        inspection: Inspection,
    ) -> Self {
        let passed = inspection.passed();
        Self {
            installation,
            command,
            exit_code,
            duration_ms,
            inspected: inspection.source.as_str().to_string(),
            found: inspection.found,
            missing: inspection.missing,
            passed,
        }
    }

    /// Fail with [`VerifyError::ExpectationMissing`] unless every marker was found.
    pub fn ensure_passed(&self) -> Result<()> {
        if self.passed {
            Ok(())
        } else {
            Err(VerifyError::ExpectationMissing {
                missing: self.missing.clone(),
            })
        }
    }
}

fn lossy_path<S: Serializer>(
    path: &Path,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
