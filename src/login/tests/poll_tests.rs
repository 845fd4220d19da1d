use super::*;
use std::collections::VecDeque;

struct Scripted {
    statuses: VecDeque<ProbeStatus>,
    checks: u32,
}

impl Scripted {
    fn new(statuses: &[ProbeStatus]) -> Self {
        Self {
            statuses: statuses.iter().copied().collect(),
            checks: 0,
        }
    }
}

#[async_trait]
impl Probe for Scripted {
    async fn check(&mut self) -> ProbeStatus {
        self.checks += 1;
        self.statuses.pop_front().unwrap_or(ProbeStatus::Pending)
    }
}

#[tokio::test(start_paused = true)]
async fn test_poll_stops_on_first_ready() {
    let mut probe = Scripted::new(&[
        ProbeStatus::Pending,
        ProbeStatus::Pending,
        ProbeStatus::Ready,
    ]);
    let start = tokio::time::Instant::now();

    let outcome = poll_until(&mut probe, Duration::from_millis(1000), 600).await;

    assert_eq!(outcome, PollOutcome::Ready { attempts: 3 });
    assert_eq!(probe.checks, 3);
    assert_eq!(start.elapsed(), Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_poll_exhausts_at_ceiling() {
    let mut probe = Scripted::new(&[]);
    let start = tokio::time::Instant::now();

    let outcome = poll_until(&mut probe, Duration::from_millis(1000), 600).await;

    assert_eq!(outcome, PollOutcome::Exhausted { attempts: 600 });
    assert_eq!(probe.checks, 600);
    assert_eq!(start.elapsed(), Duration::from_secs(600));
}

#[tokio::test(start_paused = true)]
async fn test_poll_gone_stops_immediately() {
    let mut probe = Scripted::new(&[ProbeStatus::Pending, ProbeStatus::Gone, ProbeStatus::Ready]);
    let outcome = poll_until(&mut probe, Duration::from_millis(10), 5).await;
    assert_eq!(outcome, PollOutcome::Gone { attempts: 2 });
    assert_eq!(probe.checks, 2);
}

#[tokio::test(start_paused = true)]
async fn test_poll_zero_attempts_never_checks() {
    let mut probe = Scripted::new(&[ProbeStatus::Ready]);
    let outcome = poll_until(&mut probe, Duration::from_millis(10), 0).await;
    assert_eq!(outcome, PollOutcome::Exhausted { attempts: 0 });
    assert_eq!(probe.checks, 0);
}
