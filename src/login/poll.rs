use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Ready,
    Pending,
    /// The observed surface is gone; further ticks are pointless
    Gone,
}

#[async_trait]
pub trait Probe: Send {
    async fn check(&mut self) -> ProbeStatus;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Ready { attempts: u32 },
    Exhausted { attempts: u32 },
    Gone { attempts: u32 },
}

/// Checks `probe` up to `max_attempts` times, sleeping `interval` after each
/// pending check. Stops at the first ready or gone status.
pub async fn poll_until(
    probe: &mut dyn Probe,
    interval: Duration,
    max_attempts: u32,
) -> PollOutcome {
    let mut attempts = 0;
    while attempts < max_attempts {
        let status = probe.check().await;
        attempts += 1;
        match status {
            ProbeStatus::Ready => return PollOutcome::Ready { attempts },
            ProbeStatus::Gone => return PollOutcome::Gone { attempts },
            ProbeStatus::Pending => {
                tracing::trace!(attempts, "probe pending");
                tokio::time::sleep(interval).await;
            }
        }
    }
    PollOutcome::Exhausted { attempts }
}

#[cfg(test)]
#[path = "tests/poll_tests.rs"]
mod tests;
