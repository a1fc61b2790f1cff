//! demorunner - Sequential Demo Runner
//!
//! Drives an already-deployed container stack through a scripted demo:
//! verify required tools, start services, wait for health, show status,
//! exercise the registration API and tear everything down again, even
//! when interrupted.
//!
//! # Architecture
//!
//! - [`config`]: commands, URLs and closing text, with YAML overrides
//! - [`plan`]: the `Step` model and the demo's step lists
//! - [`execution`]: command execution, readiness polling, interrupts, `DemoRunner`
//! - [`console`]: stateless formatting and output sinks
//! - [`monitoring`]: per-step timeline
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use demorunner::{CancellationToken, ConsoleReporter, DemoConfig, DemoRunner, ShellExecutor};
//!
//! #[tokio::main]
//! async fn main() -> demorunner::Result<()> {
//!     let runner = DemoRunner::new(
//!         DemoConfig::default(),
//!         Arc::new(ShellExecutor::new()),
//!         Arc::new(ConsoleReporter::default()),
//!     );
//!
//!     let token = CancellationToken::new();
//!     runner.start_demo(&token).await?;
//!     runner.cleanup().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod execution;
pub mod monitoring;
pub mod plan;

// Re-export commonly used types
pub use config::DemoConfig;
pub use console::{ConsoleReporter, Reporter};
pub use error::{DemoError, Result};
pub use execution::{DemoRunner, RunOutcome, ShellExecutor, StepOutcome};
pub use plan::Step;
pub use tokio_util::sync::CancellationToken;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "demorunner";
