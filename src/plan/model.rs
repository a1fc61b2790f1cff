//! Demo Step Model
//!
//! A demo is an ordered list of [`Step`]s. Each step either runs a shell
//! command, waits a fixed duration, or waits until a readiness probe passes.

use std::fmt;
use std::time::Duration;

use crate::execution::readiness::ReadinessPolicy;

/// What a step does when executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Run a shell command and capture its output
    Command(String),

    /// Suspend for a fixed duration
    Wait(Duration),

    /// Poll `probe` until it succeeds or the policy gives up
    AwaitReady {
        probe: String,
        policy: ReadinessPolicy,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Command(command) => write!(f, "{}", command),
            Action::Wait(duration) => write!(f, "wait {:.1?}", duration),
            Action::AwaitReady { probe, policy } => write!(
                f,
                "await ready: {} (up to {} attempts)",
                probe, policy.max_attempts
            ),
        }
    }
}

/// A single unit of work in the demo sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Human-readable label
    pub description: String,

    pub action: Action,

    /// Failure of a critical step halts the run
    pub critical: bool,
}

impl Step {
    /// Creates a best-effort command step.
    ///
    /// # Example
    ///
    /// ```
    /// use demorunner::plan::Step;
    ///
    /// let step = Step::command("Checking Docker", "docker --version").critical();
    /// assert_eq!(step.shell_command(), Some("docker --version"));
    /// ```
    pub fn command(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into().trim().to_string(),
            action: Action::Command(command.into().trim().to_string()),
            critical: false,
        }
    }

    /// Creates a fixed-duration wait step.
    pub fn wait(description: impl Into<String>, duration: Duration) -> Self {
        Self {
            description: description.into().trim().to_string(),
            action: Action::Wait(duration),
            critical: false,
        }
    }

    /// Creates a step that waits until `probe` exits successfully.
    pub fn await_ready(
        description: impl Into<String>,
        probe: impl Into<String>,
        policy: ReadinessPolicy,
    ) -> Self {
        Self {
            description: description.into().trim().to_string(),
            action: Action::AwaitReady {
                probe: probe.into().trim().to_string(),
                policy,
            },
            critical: false,
        }
    }

    /// Marks this step as critical.
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    /// Returns the shell command if this is a command step.
    pub fn shell_command(&self) -> Option<&str> {
        match &self.action {
            Action::Command(command) => Some(command),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_step_defaults() {
        let step = Step::command("Checking Docker", "docker --version");
        assert_eq!(step.description, "Checking Docker");
        assert_eq!(step.shell_command(), Some("docker --version"));
        assert!(!step.critical);
    }

    #[test]
    fn test_critical_builder() {
        let step = Step::command("Checking Git", "git --version").critical();
        assert!(step.critical);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let step = Step::command("  Status  ", "  docker compose ps \n");
        assert_eq!(step.description, "Status");
        assert_eq!(step.shell_command(), Some("docker compose ps"));
    }

    #[test]
    fn test_wait_step_has_no_command() {
        let step = Step::wait("Settle", Duration::from_secs(3));
        assert_eq!(step.action, Action::Wait(Duration::from_secs(3)));
        assert!(step.shell_command().is_none());
    }

    #[test]
    fn test_action_display() {
        let action = Action::Command("docker compose ps".to_string());
        assert_eq!(action.to_string(), "docker compose ps");

        let ready = Step::await_ready("Ready", "curl -sf x", ReadinessPolicy::default());
        assert!(ready.action.to_string().starts_with("await ready: curl -sf x"));
    }
}
