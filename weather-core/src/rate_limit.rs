use std::time::Duration;
use tokio::{sync::Mutex, time::Instant};

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Global spacing between outbound lookups, shared by every caller.
///
/// The lock is held across the wait, so concurrent callers queue in FIFO order
/// and each one observes the instant recorded by its predecessor.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub async fn await_slot(&self) {
        let mut last_request = self.last_request.lock().await;

        if let Some(last) = *last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::warn!(
                    wait_ms = wait.as_millis() as u64,
                    "Delaying request to respect rate limit"
                );
                tokio::time::sleep(wait).await;
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
