//! Configuration file discovery and loading.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. `--config <FILE>`, or `./druid-verify.yml` when present
//! 3. Command-line overrides

use crate::config::schema::{OutputSource, VerifierConfig};
use crate::error::{Result, VerifyError};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "druid-verify.yml";

/// A resolved configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The configuration after file values are applied.
    pub config: VerifierConfig,

    /// File the values were read from (None = built-in defaults).
    pub source: Option<PathBuf>,
}

/// Values from the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub install_root: Option<PathBuf>,
    pub version: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output_source: Option<OutputSource>,
}

impl ConfigOverrides {
    /// Apply every set override to `config`.
    pub fn apply(&self, config: &mut VerifierConfig) {
        if let Some(root) = &self.install_root {
            config.installation.root = root.clone();
        }
        if let Some(version) = &self.version {
            config.installation.version = version.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.task.timeout_secs = Some(secs);
        }
        if let Some(source) = self.output_source {
            config.check.output_source = source;
        }
    }
}

/// Find `druid-verify.yml` in `dir`.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<VerifierConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VerifyError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VerifyError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`VerifierConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<VerifierConfig> {
    if content.trim().is_empty() {
        return Ok(VerifierConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| VerifyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Without one, `druid-verify.yml` in
/// `working_dir` is used if present, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<LoadedConfig> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(working_dir),
    };

    let config = match &source {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(path)?
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            VerifierConfig::default()
        }
    };

    Ok(LoadedConfig { config, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_explicit_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");

        let err = load_config(Some(&path), temp.path()).unwrap_err();
        assert!(matches!(err, VerifyError::ConfigNotFound { .. }));
    }

    #[test]
    fn no_config_uses_defaults() {
        let temp = TempDir::new().unwrap();

        let loaded = load_config(None, temp.path()).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config, VerifierConfig::default());
    }

    #[test]
    fn discovers_config_in_working_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            "installation:\n  version: 0.15.0\n",
        )
        .unwrap();

        let loaded = load_config(None, temp.path()).unwrap();
        assert_eq!(loaded.config.installation.version, "0.15.0");
        assert_eq!(
            loaded.source.as_deref(),
            Some(temp.path().join(DEFAULT_CONFIG_FILE).as_path())
        );
    }

    #[test]
    fn explicit_config_wins_over_discovered() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            "installation:\n  version: discovered\n",
        )
        .unwrap();
        let explicit = temp.path().join("other.yml");
        fs::write(&explicit, "installation:\n  version: explicit\n").unwrap();

        let loaded = load_config(Some(&explicit), temp.path()).unwrap();
        assert_eq!(loaded.config.installation.version, "explicit");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("  \n", Path::new("empty.yml")).unwrap();
        assert_eq!(config, VerifierConfig::default());
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let err = parse_config("installation: [unclosed", Path::new("bad.yml")).unwrap_err();
        match err {
            VerifyError::ConfigParseError { path, .. } => {
                assert_eq!(path, PathBuf::from("bad.yml"));
            }
            other => panic!("expected ConfigParseError, got {other:?}"),
        }
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = VerifierConfig::default();
        let overrides = ConfigOverrides {
            install_root: Some(PathBuf::from("/srv/druid")),
            version: Some("0.16.0".to_string()),
            timeout_secs: Some(30),
            output_source: Some(OutputSource::Stderr),
        };

        overrides.apply(&mut config);

        assert_eq!(config.installation.root, PathBuf::from("/srv/druid"));
        assert_eq!(config.installation.version, "0.16.0");
        assert_eq!(config.task.timeout_secs, Some(30));
        assert_eq!(config.check.output_source, OutputSource::Stderr);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut config = VerifierConfig::default();
        ConfigOverrides::default().apply(&mut config);
        assert_eq!(config, VerifierConfig::default());
    }
}
