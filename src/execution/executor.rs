//! Command Executors
//!
//! The [`CommandExecutor`] trait is the seam between the runner and the
//! operating system. [`ShellExecutor`] runs commands through `sh -c`;
//! [`DryRunExecutor`] only pretends to.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs a command line to completion and captures its output.
///
/// An `Err` means the process could not be started at all; a process that
/// ran and failed is an `Ok` with `success == false`.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> io::Result<CommandOutput>;
}

/// Executes commands with the system shell.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    working_dir: Option<PathBuf>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory commands run in.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command: &str) -> io::Result<CommandOutput> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
            debug!("Executing in directory: {}", dir.display());
        }

        debug!("Spawning: sh -c {}", command);
        let output = cmd.output().await?;
        debug!("Exited with code: {:?}", output.status.code());

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Reports every command as successful without running it.
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor;

#[async_trait]
impl CommandExecutor for DryRunExecutor {
    async fn execute(&self, command: &str) -> io::Result<CommandOutput> {
        debug!("[DRY RUN] {}", command);
        Ok(CommandOutput::ok(String::new()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shell_executor_captures_stdout() {
        let output = ShellExecutor::new().execute("echo hello").await.unwrap();
        assert!(output.success);
        assert_eq!(output.code, Some(0));
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_shell_executor_captures_stderr_and_code() {
        let output = ShellExecutor::new()
            .execute("echo oops >&2; exit 3")
            .await
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn test_shell_executor_missing_tool_is_failure() {
        let output = ShellExecutor::new()
            .execute("definitely-not-a-real-tool-4821 --version")
            .await
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(127));
    }

    #[tokio::test]
    async fn test_shell_executor_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

        let output = ShellExecutor::new()
            .with_working_dir(dir.path())
            .execute("ls")
            .await
            .unwrap();
        assert!(output.stdout.contains("marker.txt"));
    }

    #[tokio::test]
    async fn test_dry_run_executor_never_fails() {
        let output = DryRunExecutor.execute("exit 1").await.unwrap();
        assert!(output.success);
        assert!(output.stdout.is_empty());
    }
}
