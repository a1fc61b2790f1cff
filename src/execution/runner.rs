//! Demo Runner
//!
//! Orchestrates the demo: prerequisite gate, service bring-up, health
//! inspection, feature demonstration, closing summary and cleanup.
//!
//! Every await point races a [`CancellationToken`]; an interrupted step is
//! dropped (killing its child process) and [`DemoRunner::start_demo`]
//! returns [`RunOutcome::Interrupted`]. A failed critical step halts the
//! whole run: a required prerequisite ends it with
//! [`RunOutcome::PrerequisitesFailed`], any other critical step with
//! [`RunOutcome::Halted`]. Every other failure is reported and the sequence
//! continues.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::config::{DemoConfig, Link};
use crate::console::{Level, Reporter};
use crate::error::Result;
use crate::monitoring::{ExecutionTimeline, StepStatus};
use crate::plan::{
    health_steps, post_json_command, prerequisite_steps, startup_steps, Action, RegistrationPayload,
    Step,
};

use super::executor::CommandExecutor;
use super::interrupt::{until_cancelled, Interrupted};
use super::readiness::{wait_until_ready, Readiness, ReadinessPolicy};
use super::step::{run_step, StepOutcome};

/// How a demo run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every stage ran (individual steps may have failed)
    Completed,
    /// A required tool is missing; no services were started
    PrerequisitesFailed { tool: String },
    /// A critical service step failed and the run stopped after it
    Halted { step: String },
    /// Cancelled before the sequence finished
    Interrupted,
}

/// How a stage of steps ended.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StageResult {
    Finished,
    /// The named critical step failed; later steps were skipped
    Halted { step: String },
}

/// Sequential demo runner.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use demorunner::config::DemoConfig;
/// use demorunner::console::ConsoleReporter;
/// use demorunner::execution::{DemoRunner, ShellExecutor};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn demo() -> demorunner::Result<()> {
/// let runner = DemoRunner::new(
///     DemoConfig::default(),
///     Arc::new(ShellExecutor::new()),
///     Arc::new(ConsoleReporter::default()),
/// );
/// let token = CancellationToken::new();
/// runner.start_demo(&token).await?;
/// runner.cleanup().await;
/// # Ok(())
/// # }
/// ```
pub struct DemoRunner {
    config: DemoConfig,
    executor: Arc<dyn CommandExecutor>,
    reporter: Arc<dyn Reporter>,
    timeline: Mutex<ExecutionTimeline>,
    cleaned_up: AtomicBool,
}

impl DemoRunner {
    pub fn new(
        config: DemoConfig,
        executor: Arc<dyn CommandExecutor>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            executor,
            reporter,
            timeline: Mutex::new(ExecutionTimeline::new()),
            cleaned_up: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Snapshot of the step timeline so far.
    pub fn timeline(&self) -> ExecutionTimeline {
        self.lock_timeline().clone()
    }

    /// Runs one command, reporting its output. Never fails.
    pub async fn run_step(&self, command: &str, description: &str) -> StepOutcome {
        run_step(
            self.executor.as_ref(),
            self.reporter.as_ref(),
            command,
            description,
        )
        .await
    }

    /// Runs the version checks in order, stopping at the first failure.
    pub async fn check_prerequisites(&self) -> bool {
        matches!(
            self.check_prerequisites_until(&CancellationToken::new()).await,
            Ok(None)
        )
    }

    /// Runs the full demo sequence.
    ///
    /// Returns an error only for failures outside any step, such as payload
    /// serialization.
    pub async fn start_demo(&self, token: &CancellationToken) -> Result<RunOutcome> {
        self.say(Level::Heading, &format!("🚀 {}", self.config.title));
        self.say(Level::Info, "=====================================");

        match self.check_prerequisites_until(token).await {
            Err(Interrupted) => return Ok(RunOutcome::Interrupted),
            Ok(Some(tool)) => {
                self.say(Level::Failure, "❌ Prerequisites check failed. Exiting demo.");
                return Ok(RunOutcome::PrerequisitesFailed { tool });
            }
            Ok(None) => {}
        }

        self.say(Level::Heading, "\n🐳 Starting Docker Containers...");
        if let Some(outcome) = self.stage_outcome(&startup_steps(&self.config), token).await {
            return Ok(outcome);
        }

        self.say(Level::Heading, "\n🔍 Testing API Health...");
        if let Some(outcome) = self.stage_outcome(&health_steps(&self.config), token).await {
            return Ok(outcome);
        }

        self.say(Level::Heading, "\n🌐 Opening Applications...");
        self.print_links(&self.config.applications);

        match self.demonstrate_features_until(token).await {
            Err(Interrupted) => return Ok(RunOutcome::Interrupted),
            Ok(result) => result?,
        }

        self.say(Level::Heading, "\n🚀 CI/CD Pipeline Information:");
        self.print_links(&self.config.pipeline);

        self.print_summary();
        Ok(RunOutcome::Completed)
    }

    /// Posts the short-password and valid-password registration payloads.
    ///
    /// Responses are reported verbatim; nothing is asserted about them.
    pub async fn demonstrate_features(&self) -> Result<()> {
        match self.demonstrate_features_until(&CancellationToken::new()).await {
            Ok(result) => result,
            Err(Interrupted) => Ok(()),
        }
    }

    /// Stops the services. Runs at most once; returns whether it ran.
    pub async fn cleanup(&self) -> bool {
        if self.cleaned_up.swap(true, Ordering::SeqCst) {
            debug!("Cleanup already performed, skipping");
            return false;
        }

        self.say(Level::Heading, "\n🧹 Cleanup...");
        let step = Step::command("Stopping all containers", &self.config.services.stop);
        let outcome = self
            .execute_tracked(&step, &CancellationToken::new())
            .await;
        if let Ok(outcome) = outcome {
            if !outcome.success {
                warn!("Teardown command failed, services may still be running");
            }
        }

        self.say(Level::Success, "✅ Cleanup completed");
        true
    }

    /// Returns the first missing tool, `None` if every check passed.
    async fn check_prerequisites_until(
        &self,
        token: &CancellationToken,
    ) -> std::result::Result<Option<String>, Interrupted> {
        self.say(Level::Heading, "\n🔍 Checking Prerequisites...");

        let steps = prerequisite_steps(&self.config);
        for (step, prerequisite) in steps.iter().zip(&self.config.prerequisites) {
            let outcome = self.execute_tracked(step, token).await?;
            if !outcome.success && step.critical {
                self.say(
                    Level::Failure,
                    &format!("❌ {} not found. Please install it first.", prerequisite.tool),
                );
                return Ok(Some(prerequisite.tool.clone()));
            }
            if !outcome.success {
                warn!("Optional prerequisite '{}' failed, continuing", prerequisite.tool);
                self.say(
                    Level::Failure,
                    &format!("⚠️  {} not found (optional), continuing", prerequisite.tool),
                );
                continue;
            }
            self.say(
                Level::Success,
                &format!("✅ {} is available", prerequisite.tool),
            );
        }

        Ok(None)
    }

    async fn demonstrate_features_until(
        &self,
        token: &CancellationToken,
    ) -> std::result::Result<Result<()>, Interrupted> {
        self.say(Level::Heading, "\n🎯 Feature Demonstration:");
        self.say(Level::Info, "\n🔒 Testing Password Validation...");

        let url = &self.config.registration_url;
        let short = match post_json_command(url, &RegistrationPayload::short_password()) {
            Ok(command) => command,
            Err(e) => return Ok(Err(e)),
        };
        let valid = match post_json_command(url, &RegistrationPayload::valid_password()) {
            Ok(command) => command,
            Err(e) => return Ok(Err(e)),
        };

        self.say(Level::Detail, "Testing short password (should fail):");
        let step = Step::command("Short password validation test", short);
        self.execute_tracked(&step, token).await?;

        self.say(Level::Detail, "\nTesting valid password (should succeed):");
        let step = Step::command("Valid password registration test", valid);
        self.execute_tracked(&step, token).await?;

        Ok(Ok(()))
    }

    /// Runs a stage and maps an early end onto the run outcome.
    async fn stage_outcome(&self, steps: &[Step], token: &CancellationToken) -> Option<RunOutcome> {
        match self.run_stage(steps, token).await {
            Err(Interrupted) => Some(RunOutcome::Interrupted),
            Ok(StageResult::Halted { step }) => {
                self.say(
                    Level::Failure,
                    &format!("❌ Critical step '{}' failed. Stopping demo.", step),
                );
                Some(RunOutcome::Halted { step })
            }
            Ok(StageResult::Finished) => None,
        }
    }

    /// Executes steps in order; a failed critical step halts the stage.
    async fn run_stage(
        &self,
        steps: &[Step],
        token: &CancellationToken,
    ) -> std::result::Result<StageResult, Interrupted> {
        for step in steps {
            let outcome = self.execute_tracked(step, token).await?;
            if !outcome.success && step.critical {
                warn!("Critical step '{}' failed, halting run", step.description);
                return Ok(StageResult::Halted {
                    step: step.description.clone(),
                });
            }
        }
        Ok(StageResult::Finished)
    }

    /// Executes one step against the token and records it on the timeline.
    async fn execute_tracked(
        &self,
        step: &Step,
        token: &CancellationToken,
    ) -> std::result::Result<StepOutcome, Interrupted> {
        let index = self.lock_timeline().start(&step.description);

        let result = until_cancelled(token, self.execute(step)).await;
        let status = match &result {
            Err(Interrupted) => StepStatus::Interrupted,
            Ok(outcome) if outcome.success => StepStatus::Completed,
            Ok(_) => StepStatus::Failed,
        };
        self.lock_timeline().finish(index, status);

        if result.is_err() {
            info!("Step '{}' interrupted", step.description);
        }
        result
    }

    async fn execute(&self, step: &Step) -> StepOutcome {
        match &step.action {
            Action::Command(command) => self.run_step(command, &step.description).await,
            Action::Wait(duration) => {
                self.say(
                    Level::Detail,
                    &format!("\n⏳ {} ({:.1?})", step.description, duration),
                );
                tokio::time::sleep(*duration).await;
                StepOutcome {
                    success: true,
                    ..StepOutcome::default()
                }
            }
            Action::AwaitReady { probe, policy } => {
                self.await_ready(&step.description, probe, policy).await
            }
        }
    }

    async fn await_ready(
        &self,
        description: &str,
        probe: &str,
        policy: &ReadinessPolicy,
    ) -> StepOutcome {
        self.say(Level::Info, &format!("\n⏳ {}", description));
        self.say(Level::Detail, &format!("Probe: {}", probe));

        let readiness = wait_until_ready(policy, |attempt| self.probe_once(probe, attempt)).await;

        match readiness {
            Readiness::Ready { attempts } => {
                self.say(
                    Level::Success,
                    &format!("✅ Services ready after {} attempt(s)", attempts),
                );
                StepOutcome {
                    success: true,
                    ..StepOutcome::default()
                }
            }
            Readiness::NotReady { attempts } => {
                let message = format!(
                    "Services not ready after {} attempts, continuing anyway",
                    attempts
                );
                self.say(Level::Failure, &format!("⚠️  {}", message));
                StepOutcome {
                    success: false,
                    error: Some(message),
                    ..StepOutcome::default()
                }
            }
        }
    }

    async fn probe_once(&self, probe: &str, attempt: u32) -> bool {
        match self.executor.execute(probe).await {
            Ok(output) => {
                debug!("Readiness probe attempt {}: success={}", attempt, output.success);
                output.success
            }
            Err(e) => {
                debug!("Readiness probe attempt {} could not start: {}", attempt, e);
                false
            }
        }
    }

    fn print_links(&self, links: &[Link]) {
        for link in links {
            self.say(Level::Info, &format!("{}: {}", link.label, link.url));
        }
    }

    fn print_summary(&self) {
        self.say(Level::Success, "\n✅ Demo completed successfully!");
        self.say(Level::Heading, "🎯 Key DevOps features demonstrated:");
        for highlight in &self.config.highlights {
            self.say(Level::Detail, &format!("   • {}", highlight));
        }

        let timeline = self.lock_timeline();
        let summary = timeline.summary();
        self.say(
            Level::Plain,
            &format!(
                "\n📊 {} steps run, {} failed, {:.1?} elapsed",
                summary.total,
                summary.failed,
                timeline.elapsed()
            ),
        );
        debug!("{}", timeline.gantt_chart());
    }

    fn say(&self, level: Level, message: &str) {
        self.reporter.emit(level, message);
    }

    fn lock_timeline(&self) -> MutexGuard<'_, ExecutionTimeline> {
        self.timeline
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
