use super::poll::{poll_until, PollOutcome, Probe, ProbeStatus};
use super::probe::{ProbeResult, PROBE_SCRIPT};
use super::surface::WebSurface;
use crate::config::LoginConfig;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The copy button is on the page; the operator copies at their own pace
    Completed,
    /// The ceiling passed without a login
    TimedOut,
    CancelledByUser,
}

/// Drives a login page until the session cookie can be copied.
///
/// Never writes settings and never fails: load, present and injection errors
/// are logged and polling carries on.
pub struct CredentialController<'a> {
    surface: &'a mut dyn WebSurface,
    interval: Duration,
    max_attempts: u32,
}

impl<'a> CredentialController<'a> {
    pub fn new(surface: &'a mut dyn WebSurface, config: &LoginConfig) -> Self {
        Self {
            surface,
            interval: Duration::from_millis(config.poll_interval_ms),
            max_attempts: config.max_poll_attempts,
        }
    }

    pub async fn acquire(&mut self, login_url: &str) -> AcquireOutcome {
        tracing::info!("Opening login page {login_url}");
        if let Err(e) = self.surface.load_url(login_url).await {
            tracing::warn!("Login page load failed: {e:#}");
        }
        if let Err(e) = self.surface.present().await {
            tracing::warn!("Could not present login page: {e:#}");
        }

        let mut probe = SurfaceProbe {
            surface: &mut *self.surface,
        };
        let outcome = match poll_until(&mut probe, self.interval, self.max_attempts).await {
            PollOutcome::Ready { attempts } => {
                tracing::info!(attempts, "Login detected, copy button shown");
                AcquireOutcome::Completed
            }
            PollOutcome::Exhausted { attempts } => {
                tracing::info!(attempts, "Login wait ceiling reached");
                AcquireOutcome::TimedOut
            }
            PollOutcome::Gone { attempts } => {
                tracing::info!(attempts, "Login page closed by operator");
                return AcquireOutcome::CancelledByUser;
            }
        };

        if let Err(e) = self.surface.present().await {
            tracing::warn!("Could not present login page: {e:#}");
        }
        outcome
    }
}

struct SurfaceProbe<'s> {
    surface: &'s mut dyn WebSurface,
}

#[async_trait]
impl Probe for SurfaceProbe<'_> {
    async fn check(&mut self) -> ProbeStatus {
        if !self.surface.is_open().await {
            return ProbeStatus::Gone;
        }
        match self.surface.evaluate(PROBE_SCRIPT).await {
            Ok(value) => {
                if ProbeResult::from_value(&value).is_add_cookie_btn {
                    ProbeStatus::Ready
                } else {
                    ProbeStatus::Pending
                }
            }
            Err(e) => {
                tracing::debug!("Probe injection failed: {e:#}");
                ProbeStatus::Pending
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
