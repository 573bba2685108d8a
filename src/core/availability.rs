use std::time::Duration;

use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use super::QuizError;

/// Lightweight reachability check against the backend.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self) -> Result<(), QuizError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 5, delay_secs: 3 }
    }
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// Which dependent calls wait for the monitor before touching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbePolicy {
    /// Deck loads, file listings and pronunciations all probe first.
    #[default]
    Always,
    /// Only the file listing probes; other calls go straight to the backend.
    Opportunistic,
}

impl ProbePolicy {
    pub fn gates_deck_load(&self) -> bool {
        matches!(self, ProbePolicy::Always)
    }

    pub fn gates_pronunciation(&self) -> bool {
        matches!(self, ProbePolicy::Always)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Checking,
    WarmingUp { attempt: u32, max_attempts: u32 },
    Available,
    Failed { attempts: u32 },
}

impl ServerStatus {
    pub fn is_warming_up(&self) -> bool {
        matches!(self, ServerStatus::WarmingUp { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ServerStatus::Checking | ServerStatus::WarmingUp { .. })
    }

    pub fn message(&self) -> Option<String> {
        match self {
            ServerStatus::Unknown | ServerStatus::Available => None,
            ServerStatus::Checking => Some("Checking server status...".to_string()),
            ServerStatus::WarmingUp { attempt, max_attempts } => Some(format!(
                "Server is starting up. Please wait a moment... (attempt {} of {})",
                attempt + 1,
                max_attempts
            )),
            ServerStatus::Failed { .. } => Some(
                "Server is currently offline. Please try again in a few minutes.".to_string(),
            ),
        }
    }
}

/// Retries the probe with a fixed delay until it succeeds or the policy runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityMonitor {
    policy: RetryPolicy,
}

impl AvailabilityMonitor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Every status change is reported through `on_status`; the final one is
    /// either `Available` or `Failed`. Returns the number of probes used.
    pub async fn ensure_available<P>(
        &self,
        probe: &P,
        mut on_status: impl FnMut(ServerStatus) + Send,
    ) -> Result<u32, QuizError>
    where
        P: Probe + ?Sized,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        on_status(ServerStatus::Checking);

        for attempt in 1..=max_attempts {
            match probe.probe().await {
                Ok(()) => {
                    log::debug!("Server reachable after {} attempt(s)", attempt);
                    on_status(ServerStatus::Available);
                    return Ok(attempt);
                }
                Err(e) => {
                    log::warn!("Server probe {}/{} failed: {}", attempt, max_attempts, e);
                    if attempt < max_attempts {
                        on_status(ServerStatus::WarmingUp { attempt, max_attempts });
                        tokio::time::sleep(self.policy.delay()).await;
                    }
                }
            }
        }

        on_status(ServerStatus::Failed { attempts: max_attempts });
        Err(QuizError::NetworkUnavailable { attempts: max_attempts })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicU32,
        Ordering,
    };

    use super::*;

    struct FlakyProbe {
        calls: AtomicU32,
        succeed_on: Option<u32>,
    }

    impl FlakyProbe {
        fn new(succeed_on: Option<u32>) -> Self {
            Self { calls: AtomicU32::new(0), succeed_on }
        }
    }

    #[async_trait]
    impl Probe for FlakyProbe {
        async fn probe(&self) -> Result<(), QuizError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if Some(call) == self.succeed_on {
                Ok(())
            } else {
                Err(QuizError::Custom("connection refused".to_string()))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let monitor = AvailabilityMonitor::new(RetryPolicy { max_attempts: 5, delay_secs: 3 });
        let probe = FlakyProbe::new(None);
        let mut statuses = Vec::new();

        let start = tokio::time::Instant::now();
        let result = monitor.ensure_available(&probe, |s| statuses.push(s)).await;

        assert!(matches!(result, Err(QuizError::NetworkUnavailable { attempts: 5 })));
        assert_eq!(probe.calls.load(Ordering::SeqCst), 5);
        assert_eq!(start.elapsed(), Duration::from_secs(12));

        let failures = statuses.iter().filter(|s| matches!(s, ServerStatus::Failed { .. })).count();
        assert_eq!(failures, 1);
        assert_eq!(statuses.last(), Some(&ServerStatus::Failed { attempts: 5 }));
        assert_eq!(statuses.iter().filter(|s| s.is_warming_up()).count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reports_available_as_soon_as_probe_succeeds() {
        let monitor = AvailabilityMonitor::default();
        let probe = FlakyProbe::new(Some(3));
        let mut statuses = Vec::new();

        let attempts = monitor.ensure_available(&probe, |s| statuses.push(s)).await.unwrap();

        assert_eq!(attempts, 3);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            statuses,
            vec![
                ServerStatus::Checking,
                ServerStatus::WarmingUp { attempt: 1, max_attempts: 5 },
                ServerStatus::WarmingUp { attempt: 2, max_attempts: 5 },
                ServerStatus::Available,
            ]
        );
        assert!(!statuses.last().unwrap().is_warming_up());
    }

    #[tokio::test]
    async fn test_zero_attempts_still_probes_once() {
        let monitor = AvailabilityMonitor::new(RetryPolicy { max_attempts: 0, delay_secs: 0 });
        let probe = FlakyProbe::new(Some(1));

        assert_eq!(monitor.ensure_available(&probe, |_| {}).await.unwrap(), 1);
    }
}
