//! Plan Builder
//!
//! Turns a [`DemoConfig`] into the ordered step lists the runner executes.

use std::time::Duration;

use crate::config::DemoConfig;

use super::model::Step;
use super::payload::shell_quote;

/// Version checks, in configured order. Critical unless marked optional.
pub fn prerequisite_steps(config: &DemoConfig) -> Vec<Step> {
    config
        .prerequisites
        .iter()
        .map(|p| {
            let step = Step::command(format!("Checking {}", p.tool), &p.command);
            if p.optional {
                step
            } else {
                step.critical()
            }
        })
        .collect()
}

/// Service bring-up: start, wait for health, list containers.
///
/// Best-effort unless `halt_on_start_failure` makes the start command critical.
pub fn startup_steps(config: &DemoConfig) -> Vec<Step> {
    let mut start = Step::command("Starting all services", &config.services.start);
    if config.halt_on_start_failure {
        start = start.critical();
    }

    vec![
        start,
        Step::await_ready(
            "Waiting for services to become healthy",
            health_probe_command(&config.health_url),
            config.readiness.clone(),
        ),
        Step::command("Checking container status", &config.services.status),
    ]
}

/// Best-effort inspection of the running stack, after an optional settle pause.
pub fn health_steps(config: &DemoConfig) -> Vec<Step> {
    let mut steps = Vec::with_capacity(3);
    if config.settle_delay_ms > 0 {
        steps.push(Step::wait(
            "Letting services settle",
            Duration::from_millis(config.settle_delay_ms),
        ));
    }
    steps.push(Step::command(
        "Backend API health check",
        format!("curl -s {}", shell_quote(&config.health_url)),
    ));
    steps.push(Step::command(
        "Container resource usage",
        &config.services.stats,
    ));
    steps
}

/// Probe that fails on connection errors and HTTP error statuses.
fn health_probe_command(url: &str) -> String {
    format!("curl -sf -o /dev/null {}", shell_quote(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prerequisite;
    use crate::execution::{CommandExecutor, ShellExecutor};
    use crate::plan::model::Action;

    #[test]
    fn test_prerequisite_steps_are_critical_and_ordered() {
        let steps = prerequisite_steps(&DemoConfig::default());

        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.critical));
        assert_eq!(steps[0].description, "Checking Docker");
        assert_eq!(steps[1].shell_command(), Some("docker compose version"));
        assert_eq!(steps[3].description, "Checking Node.js");
    }

    #[test]
    fn test_optional_prerequisite_is_not_critical() {
        let config = DemoConfig {
            prerequisites: vec![
                Prerequisite::new("Docker", "docker --version"),
                Prerequisite::new("Git", "git --version").optional(),
            ],
            ..DemoConfig::default()
        };
        let steps = prerequisite_steps(&config);

        assert!(steps[0].critical);
        assert!(!steps[1].critical);
    }

    #[test]
    fn test_halt_on_start_failure_makes_start_critical() {
        let config = DemoConfig {
            halt_on_start_failure: true,
            ..DemoConfig::default()
        };
        let steps = startup_steps(&config);

        assert!(steps[0].critical);
        assert!(steps[1..].iter().all(|s| !s.critical));
    }

    #[test]
    fn test_settle_delay_adds_wait_before_health_check() {
        let config = DemoConfig {
            settle_delay_ms: 3000,
            ..DemoConfig::default()
        };
        let steps = health_steps(&config);

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].description, "Letting services settle");
        assert_eq!(steps[0].action, Action::Wait(Duration::from_secs(3)));
        assert_eq!(steps[1].description, "Backend API health check");
    }

    #[test]
    fn test_no_settle_delay_by_default() {
        let steps = health_steps(&DemoConfig::default());
        assert!(steps.iter().all(|s| !matches!(s.action, Action::Wait(_))));
    }

    #[test]
    fn test_service_steps_order() {
        let config = DemoConfig::default();
        let steps: Vec<Step> = startup_steps(&config)
            .into_iter()
            .chain(health_steps(&config))
            .collect();
        let descriptions: Vec<&str> = steps.iter().map(|s| s.description.as_str()).collect();

        assert_eq!(
            descriptions,
            vec![
                "Starting all services",
                "Waiting for services to become healthy",
                "Checking container status",
                "Backend API health check",
                "Container resource usage",
            ]
        );
        assert!(steps.iter().all(|s| !s.critical));
    }

    #[test]
    fn test_health_check_uses_configured_url() {
        let config = DemoConfig {
            health_url: "http://localhost:9000/healthz".to_string(),
            ..DemoConfig::default()
        };
        let startup = startup_steps(&config);
        let health = health_steps(&config);

        assert_eq!(
            health[0].shell_command(),
            Some("curl -s 'http://localhost:9000/healthz'")
        );
        match &startup[1].action {
            Action::AwaitReady { probe, .. } => {
                assert_eq!(probe, "curl -sf -o /dev/null 'http://localhost:9000/healthz'");
            }
            other => panic!("expected readiness step, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_url_with_shell_metacharacters_stays_one_argument() {
        let config = DemoConfig {
            health_url: "http://127.0.0.1:1/api/health?a=1&echo INJECTED".to_string(),
            ..DemoConfig::default()
        };
        let executor = ShellExecutor::new();

        let mut commands: Vec<String> = health_steps(&config)
            .iter()
            .filter_map(|s| s.shell_command().map(String::from))
            .filter(|c| c.starts_with("curl"))
            .collect();
        if let Action::AwaitReady { probe, .. } = &startup_steps(&config)[1].action {
            commands.push(probe.clone());
        }
        assert_eq!(commands.len(), 2);

        for command in commands {
            let output = executor.execute(&command).await.unwrap();
            assert!(
                !output.stdout.contains("INJECTED"),
                "'{}' ran a second command",
                command
            );
        }
    }
}
