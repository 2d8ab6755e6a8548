//! Environment detection and process-group control.

/// CI environment variables checked by [`is_ci`].
const CI_VARS: [&str; 6] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
///
/// Used by `main()` to pick the non-interactive UI, which prints plain lines
/// instead of a spinner while the task runs.
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var(var).is_ok())
}

/// Send SIGKILL to every process in the group led by `pid`.
///
/// The child must have been spawned as a group leader; see
/// [`execute`](super::execute). Returns whether the signal was delivered.
pub fn kill_process_group(pid: u32) -> bool {
    #[cfg(unix)]
    {
        let Ok(pgid) = libc::pid_t::try_from(pid) else {
            return false;
        };
        // SAFETY: kill() only sends a signal; a negative pid addresses the group.
        unsafe { libc::kill(-pgid, libc::SIGKILL) == 0 }
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        false
    }
}
