//! druid-verify - smoke test for a local Druid installation.
//!
//! Submits the bundled Wikipedia sample ingestion task through the
//! installation's `post-index-task` tool and checks the captured output for
//! the success markers the tool prints when the task completes and the data
//! becomes queryable.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, overrides, and validation
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Child process execution
//! - [`ui`] - Terminal, non-interactive, and mock output
//! - [`verifier`] - Installation lookup, task submission, and output checks
//!
//! # Example
//!
//! ```
//! use druid_verify::config::VerifierConfig;
//! use druid_verify::verifier::Verifier;
//! use std::path::PathBuf;
//!
//! let verifier = Verifier::new(VerifierConfig::default());
//! let install = verifier.locate_installation();
//! assert_eq!(install, PathBuf::from("/opt/druid/apache-druid-0.13.0-incubating"));
//!
//! let invocation = verifier.task_invocation(&install);
//! assert_eq!(
//!     invocation.flag_value("--file").map(PathBuf::from),
//!     Some(install.join("quickstart/tutorial/wikipedia-index.json"))
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod shell;
pub mod ui;
pub mod verifier;

pub use error::{Result, VerifyError};
