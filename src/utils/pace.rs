use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Shared pacing discipline for outbound requests to the external host.
///
/// Every component that talks to the site reserves a send slot here, so the
/// inter-request interval holds across the whole run regardless of which
/// stage is making the call. This is a politeness limit, not a performance
/// knob.
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Waits until the next send slot is available.
    pub async fn pace(&self) {
        let wait = self.reserve(Instant::now());
        if wait > Duration::ZERO {
            tokio::time::sleep(wait).await;
        }
    }

    /// Reserves the next send slot and returns how long the caller must wait
    /// before using it. Separated from `pace` so the interval arithmetic is
    /// testable without wall-clock sleeps.
    pub fn reserve(&self, now: Instant) -> Duration {
        let mut slot = self
            .next_slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let start = match *slot {
            Some(next) if next > now => next,
            _ => now,
        };
        *slot = Some(start + self.interval);
        start.saturating_duration_since(now)
    }
}
