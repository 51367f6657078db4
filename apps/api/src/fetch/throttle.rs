use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Best-effort client-side rate limit: successive `acquire` calls are spaced
/// by at least `interval`.
///
/// The lock is held across the wait, so concurrent callers queue up and each
/// gets its own slot. Single process only.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Suspends until the interval since the previous call has elapsed, then
    /// records the current instant. Returns how long the caller waited.
    pub async fn acquire(&self) -> Duration {
        let mut last = self.last.lock().await;
        let mut waited = Duration::ZERO;

        if let Some(previous) = *last {
            let ready_at = previous + self.interval;
            let now = Instant::now();
            if now < ready_at {
                waited = ready_at - now;
                debug!(wait_ms = waited.as_millis() as u64, "Throttling request");
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
        waited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_does_not_wait() {
        let throttle = Throttle::new(Duration::from_millis(1000));
        assert_eq!(throttle.acquire().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_acquires_are_spaced() {
        let throttle = Throttle::new(Duration::from_millis(1000));
        let start = Instant::now();
        throttle.acquire().await;
        throttle.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_only_for_remaining_interval() {
        let throttle = Throttle::new(Duration::from_millis(1000));
        throttle.acquire().await;
        tokio::time::advance(Duration::from_millis(600)).await;
        let waited = throttle.acquire().await;
        assert_eq!(waited, Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_elapsed() {
        let throttle = Throttle::new(Duration::from_millis(1000));
        throttle.acquire().await;
        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(throttle.acquire().await, Duration::ZERO);
    }
}
