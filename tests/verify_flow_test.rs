//! End-to-end runs against a fake installation whose `post-index-task` is a
//! shell script.
#![cfg(unix)]
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

mod common;

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use common::{FakeInstall, FAILED_SCRIPT, SLOW_SCRIPT, STDOUT_ONLY_SCRIPT, SUCCESS_SCRIPT};
use predicates::prelude::*;

fn druid_verify(install: &FakeInstall) -> Command {
    let mut cmd = Command::new(cargo_bin("druid-verify"));
    cmd.current_dir(install.root_path())
        .env_remove("DRUID_VERIFY_VERSION")
        .env_remove("RUST_LOG")
        .env("DRUID_VERIFY_INSTALL_ROOT", install.root_path());
    cmd
}

#[test]
fn no_args_runs_verification() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting test for Druid"))
        .stdout(predicate::str::contains("Beginning indexing data for wikipedia"))
        .stdout(predicate::str::contains("Task finished with status: SUCCESS"))
        .stdout(predicate::str::contains("Success"));
    Ok(())
}

#[test]
fn failed_task_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(FAILED_SCRIPT);
    druid_verify(&install)
        .arg("run")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Task finished with status: FAILED"))
        .stderr(predicate::str::contains("Expected output not found"))
        .stderr(predicate::str::contains("wikipedia loading complete!"));
    Ok(())
}

#[test]
fn stdout_only_success_passes_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(STDOUT_ONLY_SCRIPT);
    druid_verify(&install)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success"));
    Ok(())
}

#[test]
fn stdout_only_success_fails_with_stderr_only() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(STDOUT_ONLY_SCRIPT);
    druid_verify(&install)
        .args(["run", "--stderr-only"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No output captured from stderr"));
    Ok(())
}

#[test]
fn wrong_version_is_launch_failure() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .args(["--druid-version", "0.0.1", "run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to launch"))
        .stderr(predicate::str::contains("apache-druid-0.0.1"));
    Ok(())
}

#[test]
fn slow_task_times_out() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SLOW_SCRIPT);
    druid_verify(&install)
        .args(["--timeout", "1", "run"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timed out after 1s"));
    Ok(())
}

#[test]
fn json_report_on_success() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    let output = druid_verify(&install).args(["run", "--json"]).output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["passed"], true);
    assert_eq!(report["exit_code"], 0);
    assert_eq!(report["inspected"], "stdout+stderr");
    assert_eq!(report["found"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        report["installation"],
        install.installation().display().to_string()
    );
    Ok(())
}

#[test]
fn json_report_on_failure() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(FAILED_SCRIPT);
    let output = druid_verify(&install).args(["run", "--json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["passed"], false);
    assert_eq!(report["exit_code"], 1);
    assert_eq!(report["missing"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn quiet_hides_captured_output() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .args(["--quiet", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beginning indexing").not())
        .stdout(predicate::str::contains("Success"));
    Ok(())
}

#[test]
fn locate_check_on_fake_install() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .args(["locate", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entry point found"))
        .stdout(predicate::str::contains("task descriptor found"));
    Ok(())
}

#[test]
fn non_utf8_install_root_reaches_submission_tool() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::ffi::OsStrExt;

    let install = FakeInstall::with_root_name(
        SUCCESS_SCRIPT,
        std::ffi::OsStr::from_bytes(b"r\xffoot"),
    );
    druid_verify(&install)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success"));

    let output = druid_verify(&install).args(["run", "--json"]).output()?;
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["passed"], true);
    Ok(())
}

#[test]
fn json_report_ignores_silent_default_output() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    install.write_config("settings:\n  default_output: silent\n");

    let output = druid_verify(&install).args(["run", "--json"]).output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["passed"], true);
    Ok(())
}

#[test]
fn silent_default_output_hides_status_lines() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    install.write_config("settings:\n  default_output: silent\n");

    druid_verify(&install)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn verbose_shows_command_line_and_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .args(["--verbose", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Command: "))
        .stdout(predicate::str::contains("bin/post-index-task --file"))
        .stdout(predicate::str::contains("Exit code: 0"));
    Ok(())
}

#[test]
fn normal_output_omits_verbose_details() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit code:").not());
    Ok(())
}

#[test]
fn info_logs_hidden_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .arg("run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Submitting sample task").not());
    Ok(())
}

#[test]
fn rust_log_enables_info_logs() -> Result<(), Box<dyn std::error::Error>> {
    let install = FakeInstall::new(SUCCESS_SCRIPT);
    druid_verify(&install)
        .env("RUST_LOG", "druid_verify=info")
        .arg("run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Submitting sample task"));
    Ok(())
}
