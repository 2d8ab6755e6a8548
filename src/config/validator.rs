//! Configuration validation rules.
//!
//! - Distribution and version must be non-empty
//! - Entry point and descriptor must stay inside the installation directory
//! - At least one non-blank marker must be expected

use crate::config::schema::VerifierConfig;
use crate::error::{Result, VerifyError};
use std::path::{Component, Path};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Config key the error refers to
    pub field: String,
}

impl ValidationError {
    fn new(rule: &str, field: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            field: field.to_string(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &VerifierConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_installation(config));
    errors.extend(validate_task(config));
    errors.extend(validate_check(config));

    errors
}

fn validate_installation(config: &VerifierConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let install = &config.installation;

    if install.distribution.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-distribution",
            "installation.distribution",
            "Distribution name must not be empty".to_string(),
        ));
    }

    if install.version.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-version",
            "installation.version",
            "Version must not be empty".to_string(),
        ));
    } else if install.version.contains(['/', '\\']) {
        errors.push(ValidationError::new(
            "invalid-version",
            "installation.version",
            format!(
                "Version '{}' must not contain path separators",
                install.version
            ),
        ));
    }

    errors
}

fn validate_task(config: &VerifierConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, path) in [
        ("task.entry_point", &config.task.entry_point),
        ("task.descriptor", &config.task.descriptor),
    ] {
        if let Some(message) = check_anchored(path) {
            errors.push(ValidationError::new(
                "unanchored-path",
                field,
                format!("'{}' {}", path.display(), message),
            ));
        }
    }

    errors
}

/// Why `path` cannot be anchored inside the installation, if it can't.
fn check_anchored(path: &Path) -> Option<&'static str> {
    if path.as_os_str().is_empty() {
        return Some("must not be empty");
    }
    if path.has_root() {
        return Some("must be relative to the installation directory");
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Some("must not leave the installation directory");
    }
    None
}

fn validate_check(config: &VerifierConfig) -> Vec<ValidationError> {
    let markers = &config.check.expected_markers;

    if markers.is_empty() {
        return vec![ValidationError::new(
            "no-markers",
            "check.expected_markers",
            "At least one expected marker is required".to_string(),
        )];
    }

    markers
        .iter()
        .enumerate()
        .filter(|(_, m)| m.trim().is_empty())
        .map(|(i, _)| {
            ValidationError::new(
                "blank-marker",
                "check.expected_markers",
                format!("Expected marker #{} is blank", i + 1),
            )
        })
        .collect()
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &VerifierConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(VerifyError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
