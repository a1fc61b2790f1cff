//! Readiness Polling
//!
//! Waits for external services by polling a probe with bounded exponential
//! backoff instead of sleeping for a fixed time.

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Bounded retry schedule for readiness probes.
///
/// The delay after attempt `n` (0-based) is
/// `initial_delay * multiplier^n`, capped at `max_delay`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReadinessPolicy {
    /// Probe attempts before giving up (at least 1)
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub multiplier: f64,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 500,
            max_delay_ms: 4_000,
            multiplier: 2.0,
        }
    }
}

impl ReadinessPolicy {
    /// Delay to wait after the given 0-based attempt fails.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let scaled = self.initial_delay_ms as f64 * self.multiplier.powi(exponent);
        let capped = scaled.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }

    /// Total time spent sleeping if every attempt fails.
    pub fn worst_case(&self) -> Duration {
        (0..self.max_attempts.saturating_sub(1))
            .map(|attempt| self.delay_after(attempt))
            .sum()
    }
}

/// Result of a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// The probe passed on the given attempt
    Ready { attempts: u32 },
    /// Every attempt failed
    NotReady { attempts: u32 },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

/// Polls `probe` until it returns `true` or the policy is exhausted.
///
/// `probe` receives the 1-based attempt number. Sleeps use
/// `tokio::time`, so paused-clock tests run instantly.
pub async fn wait_until_ready<F, Fut>(policy: &ReadinessPolicy, mut probe: F) -> Readiness
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = bool>,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if probe(attempt).await {
            info!("Services ready after {} attempt(s)", attempt);
            return Readiness::Ready { attempts: attempt };
        }

        if attempt < max_attempts {
            let delay = policy.delay_after(attempt - 1);
            debug!(
                "Readiness probe attempt {}/{} failed, retrying in {:?}",
                attempt, max_attempts, delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    warn!("Services not ready after {} attempts", max_attempts);
    Readiness::NotReady {
        attempts: max_attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn policy(max_attempts: u32) -> ReadinessPolicy {
        ReadinessPolicy {
            max_attempts,
            initial_delay_ms: 100,
            max_delay_ms: 1_000,
            multiplier: 2.0,
        }
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let p = policy(10);
        assert_eq!(p.delay_after(0), Duration::from_millis(100));
        assert_eq!(p.delay_after(1), Duration::from_millis(200));
        assert_eq!(p.delay_after(2), Duration::from_millis(400));
        assert_eq!(p.delay_after(3), Duration::from_millis(800));
        assert_eq!(p.delay_after(4), Duration::from_millis(1_000));
        assert_eq!(p.delay_after(60), Duration::from_millis(1_000));
    }

    #[test]
    fn test_constant_backoff() {
        let p = ReadinessPolicy {
            multiplier: 1.0,
            ..policy(5)
        };
        assert_eq!(p.delay_after(0), p.delay_after(3));
    }

    #[test]
    fn test_worst_case() {
        // 100 + 200 + 400
        assert_eq!(policy(4).worst_case(), Duration::from_millis(700));
        assert_eq!(policy(1).worst_case(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_first_attempt_does_not_sleep() {
        let start = Instant::now();
        let result = wait_until_ready(&policy(5), |_| async { true }).await;

        assert_eq!(result, Readiness::Ready { attempts: 1 });
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_retries() {
        let start = Instant::now();
        let result = wait_until_ready(&policy(5), |attempt| async move { attempt == 3 }).await;

        assert_eq!(result, Readiness::Ready { attempts: 3 });
        // Slept 100ms then 200ms
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let p = policy(4);
        let start = Instant::now();

        let result = wait_until_ready(&p, |_| {
            calls.set(calls.get() + 1);
            async { false }
        })
        .await;

        assert_eq!(result, Readiness::NotReady { attempts: 4 });
        assert!(!result.is_ready());
        assert_eq!(calls.get(), 4);
        assert_eq!(start.elapsed(), p.worst_case());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_probes_once() {
        let calls = Cell::new(0);
        let result = wait_until_ready(&policy(0), |_| {
            calls.set(calls.get() + 1);
            async { false }
        })
        .await;

        assert_eq!(result, Readiness::NotReady { attempts: 1 });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_policy_from_partial_yaml() {
        let p: ReadinessPolicy = serde_yaml::from_str("max_attempts: 3").unwrap();
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.initial_delay_ms, 500);
    }
}
