//! Demo Session
//!
//! Drives one run end to end: the demo sequence, then the cleanup that fits
//! how it ended. The entry point only wires up the runner and the signal
//! listener and maps the result onto an exit status.

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::console::{Level, Reporter};
use crate::error::Result;

use super::runner::{DemoRunner, RunOutcome};

/// Runs the demo and tears the services down unless none were started.
///
/// Cleanup follows a completed, halted or interrupted run, and also a run
/// that failed with an error, since services may already be up by then.
/// A failed prerequisite gate skips it.
pub async fn run_demo(
    runner: &DemoRunner,
    reporter: &dyn Reporter,
    token: &CancellationToken,
) -> Result<RunOutcome> {
    let outcome = runner.start_demo(token).await;

    match &outcome {
        Ok(RunOutcome::Completed) => {
            runner.cleanup().await;
        }
        Ok(RunOutcome::Halted { step }) => {
            info!("Run halted at '{}', cleaning up", step);
            runner.cleanup().await;
        }
        Ok(RunOutcome::Interrupted) => {
            reporter.emit(Level::Plain, "\n\n🛑 Demo interrupted. Cleaning up...");
            runner.cleanup().await;
        }
        Ok(RunOutcome::PrerequisitesFailed { tool }) => {
            info!("Prerequisite '{}' missing, nothing to clean up", tool);
        }
        Err(_) => {
            warn!("Run failed, cleaning up before exit");
            runner.cleanup().await;
        }
    }

    outcome
}

/// Process exit status for a finished session.
///
/// Every outcome the runner reports is a normal exit; only errors fail.
pub fn exit_status(result: &Result<RunOutcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
