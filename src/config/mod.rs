//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and CLI overrides in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use druid_verify::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("druid-verify.yml"),
//!     "installation:\n  version: 0.14.0-incubating\n",
//! )
//! .unwrap();
//!
//! let loaded = load_config(None, temp.path()).unwrap();
//! validate(&loaded.config).unwrap();
//! assert_eq!(loaded.config.installation.version, "0.14.0-incubating");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use schema::{
    CheckConfig, InstallationConfig, OutputSource, Settings, TaskConfig, VerifierConfig,
    LOAD_COMPLETE_MARKER, TASK_SUCCESS_MARKER,
};

pub use loader::{
    discover_config, load_config, load_config_file, parse_config, ConfigOverrides, LoadedConfig,
    DEFAULT_CONFIG_FILE,
};

pub use validator::{validate, validate_config, ValidationError};
