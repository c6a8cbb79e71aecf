//! Execution of external collaborator commands.
//!
//! Every effectful step of the pipeline flows through the [`CommandRunner`]
//! trait so the sequencing logic can be exercised with a fake runner. The
//! production implementation is [`SystemRunner`].

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use std::process::ExitStatus;

use anyhow::Context;
use anyhow::Result;
use tracing::debug;

/// Runs external commands on behalf of the pipeline.
pub trait CommandRunner {
    /// Runs `program` with `args`, with the working directory set to `dir`,
    /// and waits for it to complete.
    ///
    /// Returns an error if the command could not be spawned (e.g. the
    /// program is not installed). A non-zero exit is not an error at this
    /// level; the returned [`ExitStatus`] is for the caller to judge.
    fn run(&self, program: &str, args: &[OsString], dir: &Path) -> Result<ExitStatus>;
}

/// A [`CommandRunner`] that spawns real processes.
///
/// The child inherits stdio, so collaborator output streams straight to the
/// user's terminal.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[OsString], dir: &Path) -> Result<ExitStatus> {
        debug!(
            "running `{program} {args}` in `{dir}`",
            args = args
                .iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "),
            dir = dir.display()
        );

        Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()
            .with_context(|| format!("failed to spawn `{program}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an argument list for `sh -c <script>`.
    fn sh(script: &str) -> Vec<OsString> {
        vec![OsString::from("-c"), OsString::from(script)]
    }

    #[test]
    fn reports_the_child_exit_status() {
        let dir = tempfile::tempdir().expect("a temporary directory");

        let status = SystemRunner
            .run("sh", &sh("exit 0"), dir.path())
            .expect("the command should spawn");
        assert!(status.success());

        let status = SystemRunner
            .run("sh", &sh("exit 3"), dir.path())
            .expect("the command should spawn");
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn runs_in_the_requested_directory() {
        let dir = tempfile::tempdir().expect("a temporary directory");
        std::fs::write(dir.path().join("marker"), "").expect("a marker file");

        let status = SystemRunner
            .run("sh", &sh("test -f marker"), dir.path())
            .expect("the command should spawn");
        assert!(status.success());
    }

    #[test]
    fn spawn_failures_are_errors() {
        let dir = tempfile::tempdir().expect("a temporary directory");

        let err = SystemRunner
            .run("tgv-does-not-exist", &[], dir.path())
            .expect_err("spawning should fail");
        assert!(err.to_string().contains("tgv-does-not-exist"));
    }
}
