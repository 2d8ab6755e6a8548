//! Marker inspection of captured output.

use std::borrow::Cow;

use crate::config::{CheckConfig, OutputSource};
use crate::error::{Result, VerifyError};
use crate::shell::CommandResult;

/// Which markers were found in the inspected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    /// Stream(s) that were searched.
    pub source: OutputSource,
    /// Markers present, in configured order.
    pub found: Vec<String>,
    /// Markers absent, in configured order.
    pub missing: Vec<String>,
}

impl Inspection {
    /// True when every marker was found.
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    /// Convert a failed inspection into [`VerifyError::ExpectationMissing`].
    pub fn into_result(self) -> Result<Self> {
        if self.passed() {
            Ok(self)
        } else {
            Err(VerifyError::ExpectationMissing {
                missing: self.missing,
            })
        }
    }
}

/// Text searched for markers under `source`.
///
/// With [`OutputSource::Either`] the streams are joined by a newline so a
/// marker cannot match across the boundary.
pub fn inspected_text(result: &CommandResult, source: OutputSource) -> Cow<'_, str> {
    match source {
        OutputSource::Stderr => Cow::Borrowed(result.stderr.as_str()),
        OutputSource::Either => match (result.stdout.is_empty(), result.stderr.is_empty()) {
            (true, _) => Cow::Borrowed(result.stderr.as_str()),
            (_, true) => Cow::Borrowed(result.stdout.as_str()),
            _ => Cow::Owned(format!("{}\n{}", result.stdout, result.stderr)),
        },
    }
}

/// Search the captured output for every expected marker.
///
/// # Errors
///
/// Returns `NoOutput` when the inspected text is empty or whitespace. A
/// missing marker is not an error here; see [`Inspection::into_result`].
pub fn inspect(result: &CommandResult, check: &CheckConfig) -> Result<Inspection> {
    let text = inspected_text(result, check.output_source);

    if text.trim().is_empty() {
        return Err(VerifyError::NoOutput {
            stream: check.output_source.as_str().to_string(),
        });
    }

    let (found, missing): (Vec<String>, Vec<String>) = check
        .expected_markers
        .iter()
        .cloned()
        .partition(|marker| text.contains(marker.as_str()));

    tracing::debug!(
        source = %check.output_source,
        found = found.len(),
        missing = missing.len(),
        "Inspected captured output"
    );

    Ok(Inspection {
        source: check.output_source,
        found,
        missing,
    })
}
