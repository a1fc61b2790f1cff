//! Individual Step Execution
//!
//! Runs one command, narrates it, and folds every possible failure into a
//! [`StepOutcome`]. Nothing here returns an error.

use log::{debug, error};

use crate::console::{Level, Reporter};

use super::executor::CommandExecutor;

/// Result of running one command step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepOutcome {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// Populated whenever `success` is false
    pub error: Option<String>,
}

impl StepOutcome {
    fn failed(stdout: String, stderr: String, message: String) -> Self {
        Self {
            success: false,
            stdout,
            stderr,
            error: Some(message),
        }
    }
}

/// Executes `command`, reporting progress and captured output.
///
/// # Reported lines
///
/// - `🔧 <description>` before running
/// - `Command: <command>`
/// - captured stdout and stderr, when non-empty
/// - `Error: <message>` if the command failed or could not start
pub async fn run_step(
    executor: &dyn CommandExecutor,
    reporter: &dyn Reporter,
    command: &str,
    description: &str,
) -> StepOutcome {
    reporter.emit(Level::Info, &format!("\n🔧 {}", description));
    reporter.emit(Level::Detail, &format!("Command: {}", command));

    match executor.execute(command).await {
        Ok(output) if output.success => {
            if !output.stdout.is_empty() {
                reporter.emit(Level::Output, &output.stdout);
            }
            if !output.stderr.is_empty() {
                reporter.emit(Level::ErrorOutput, &output.stderr);
            }
            debug!("Step '{}' completed successfully", description);

            StepOutcome {
                success: true,
                stdout: output.stdout,
                stderr: output.stderr,
                error: None,
            }
        }
        Ok(output) => {
            let mut message = match output.code {
                Some(code) => format!("Command failed (exit code {}): {}", code, command),
                None => format!("Command terminated by signal: {}", command),
            };
            if !output.stderr.trim().is_empty() {
                message.push('\n');
                message.push_str(output.stderr.trim_end());
            }

            error!(
                "Step '{}' failed with exit code: {:?}",
                description, output.code
            );
            reporter.emit(Level::Failure, &format!("Error: {}", message));

            StepOutcome::failed(output.stdout, output.stderr, message)
        }
        Err(e) => {
            let message = format!("Failed to start command '{}': {}", command, e);

            error!("Step '{}' could not start: {}", description, e);
            reporter.emit(Level::Failure, &format!("Error: {}", message));

            StepOutcome::failed(String::new(), String::new(), message)
        }
    }
}
