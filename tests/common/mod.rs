//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const VERSION: &str = "0.13.0-incubating";

pub const SUCCESS_SCRIPT: &str = r#"#!/bin/sh
[ "$1" = "--file" ] || { echo "usage: post-index-task --file <task.json>" >&2; exit 2; }
[ -f "$2" ] || { echo "Task descriptor not found: $2" >&2; exit 1; }
echo "Beginning indexing data for wikipedia"
echo "Task started: index_wikipedia_2018-01-01T00:00:00.000Z" >&2
echo "Task finished with status: SUCCESS" >&2
echo "Completed indexing data for wikipedia. Now loading indexed data onto the cluster..." >&2
echo "wikipedia loading complete! You may now query your data" >&2
"#;

pub const FAILED_SCRIPT: &str = r#"#!/bin/sh
echo "Task started: index_wikipedia" >&2
echo "Task finished with status: FAILED" >&2
exit 1
"#;

pub const STDOUT_ONLY_SCRIPT: &str = r#"#!/bin/sh
echo "Task finished with status: SUCCESS"
echo "wikipedia loading complete! You may now query your data"
"#;

pub const SLOW_SCRIPT: &str = r#"#!/bin/sh
exec sleep 30
"#;

/// A fake install root holding `apache-druid-<VERSION>` with the given
/// submission script and the sample task descriptor.
pub struct FakeInstall {
    _temp: TempDir,
    root: PathBuf,
}

impl FakeInstall {
    pub fn new(script: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        Self::populate(temp, root, script)
    }

    /// Like [`FakeInstall::new`], but the install root is a directory
    /// called `name` inside the temp dir.
    pub fn with_root_name(script: &str, name: &OsStr) -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(name);
        fs::create_dir(&root).unwrap();
        Self::populate(temp, root, script)
    }

    fn populate(temp: TempDir, root: PathBuf, script: &str) -> Self {
        let install = root.join(format!("apache-druid-{}", VERSION));
        fs::create_dir_all(install.join("bin")).unwrap();
        fs::create_dir_all(install.join("quickstart/tutorial")).unwrap();
        fs::write(
            install.join("quickstart/tutorial/wikipedia-index.json"),
            r#"{"type": "index", "spec": {"dataSchema": {"dataSource": "wikipedia"}}}"#,
        )
        .unwrap();

        let entry = install.join("bin/post-index-task");
        fs::write(&entry, script).unwrap();
        make_executable(&entry);

        Self { _temp: temp, root }
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    pub fn installation(&self) -> PathBuf {
        self.root.join(format!("apache-druid-{}", VERSION))
    }

    /// Write `druid-verify.yml` into the root, which tests also use as cwd.
    pub fn write_config(&self, yaml: &str) {
        fs::write(self.root.join("druid-verify.yml"), yaml).unwrap();
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
