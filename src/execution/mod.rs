//! Demo Execution Module
//!
//! Runs demo steps in order against external tools, with readiness
//! polling and interrupt-safe cancellation.
//!
//! # Architecture
//!
//! - [`executor`]: the `CommandExecutor` seam (shell and dry-run)
//! - [`step`]: single command execution and outcome capture
//! - [`readiness`]: poll-until-ready with bounded backoff
//! - [`interrupt`]: signal listener and cancellation racing
//! - [`runner`]: `DemoRunner`, the demo sequence itself

pub mod executor;
pub mod interrupt;
pub mod readiness;
pub mod runner;
pub mod session;
pub mod step;

pub use executor::{CommandExecutor, CommandOutput, DryRunExecutor, ShellExecutor};
pub use interrupt::{spawn_listener, until_cancelled, Interrupted};
pub use readiness::{wait_until_ready, Readiness, ReadinessPolicy};
pub use runner::{DemoRunner, RunOutcome};
pub use session::{exit_status, run_demo};
pub use step::{run_step, StepOutcome};
